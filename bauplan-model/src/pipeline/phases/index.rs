//! Index phase - collects the public method signatures of every type.

use eyre::Result;

use crate::{
    Indexer,
    pipeline::{CompilationContext, Phase},
};

pub struct IndexPhase;

impl Phase for IndexPhase {
    fn name(&self) -> &'static str {
        "index"
    }

    fn description(&self) -> &'static str {
        "Index public methods per type, keeping the most specific override"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let index = Indexer::new(&ctx.universe, &ctx.manifest.filter, &ctx.docs)
            .with_aliases(&ctx.manifest.type_names)
            .index();

        tracing::debug!(
            types = index.type_count(),
            methods = index.method_count(),
            "indexed methods"
        );
        let message = format!(
            "indexed {} methods on {} types",
            index.method_count(),
            index.type_count()
        );
        ctx.add_info(self.name(), message);
        ctx.index = Some(index);
        Ok(())
    }
}
