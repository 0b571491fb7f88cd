//! Lower phase - projects target models into the DSL model.

use eyre::Result;

use crate::{
    dsl::Lowering,
    pipeline::{CompilationContext, Phase},
};

pub struct LowerPhase;

impl Phase for LowerPhase {
    fn name(&self) -> &'static str {
        "lower"
    }

    fn description(&self) -> &'static str {
        "Project target models into type, collection and map DSLs"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let targets = ctx.targets.as_ref().ok_or_else(|| {
            eyre::eyre!("targets not set - LowerPhase must run after AssemblePhase")
        })?;

        let target_prefix = ctx.manifest.target_prefix();
        let dsl = Lowering::new(ctx.resolver(), &ctx.manifest.source.prefix, &target_prefix)
            .lower(targets);

        ctx.dsl = Some(dsl);
        Ok(())
    }
}
