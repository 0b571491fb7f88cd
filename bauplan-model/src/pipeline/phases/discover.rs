//! Discover phase - finds builder/target pairs.

use eyre::Result;

use crate::{
    discover,
    pipeline::{CompilationContext, Diagnostic, Phase},
};

pub struct DiscoverPhase;

impl Phase for DiscoverPhase {
    fn name(&self) -> &'static str {
        "discover"
    }

    fn description(&self) -> &'static str {
        "Pair builders with the targets they build under the source prefix"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let index = ctx
            .index
            .as_ref()
            .ok_or_else(|| eyre::eyre!("index not set - DiscoverPhase must run after IndexPhase"))?;

        let prefix = &ctx.manifest.source.prefix;
        let discovery = discover(index, &ctx.universe, prefix);
        tracing::debug!(
            pairs = discovery.len(),
            ambiguous = discovery.ambiguous.len(),
            rejected = discovery.rejected.len(),
            "discovered builders"
        );

        if discovery.is_empty() {
            let message = format!("no builder/target pairs found under '{}'", prefix);
            ctx.add_warning(self.name(), message);
        }
        for ambiguous in &discovery.ambiguous {
            let message = format!(
                "'{}' also builds '{}'; keeping pair with '{}'",
                ambiguous.dropped.builder, ambiguous.dropped.target, ambiguous.kept.builder
            );
            ctx.add_diagnostic(Diagnostic::warning(self.name(), message).at(&ambiguous.dropped.target));
        }
        for rejected in &discovery.rejected {
            let message = format!(
                "'{}' has no static builder() returning '{}'",
                rejected.target, rejected.builder
            );
            ctx.add_diagnostic(Diagnostic::info(self.name(), message).at(&rejected.builder));
        }

        ctx.discovery = Some(discovery);
        Ok(())
    }
}
