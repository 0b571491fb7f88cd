//! Assemble phase - builds one target model per discovered pair.

use eyre::Result;

use crate::{
    ModelBuilder,
    pipeline::{CompilationContext, Diagnostic, Phase},
};

pub struct AssemblePhase;

impl Phase for AssemblePhase {
    fn name(&self) -> &'static str {
        "assemble"
    }

    fn description(&self) -> &'static str {
        "Group attribute setters and collect nested builders and usages per target"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let discovery = ctx.discovery.as_ref().ok_or_else(|| {
            eyre::eyre!("discovery not set - AssemblePhase must run after DiscoverPhase")
        })?;
        let index = ctx
            .index
            .as_ref()
            .filter(|index| index.is_classified())
            .ok_or_else(|| {
                eyre::eyre!("index not classified - AssemblePhase must run after ClassifyPhase")
            })?;

        let targets = ModelBuilder::new(
            &ctx.universe,
            index,
            discovery,
            &ctx.manifest.model,
            &ctx.docs,
        )
        .build();
        tracing::debug!(targets = targets.len(), "assembled target models");

        let trivial: Vec<Diagnostic> = targets
            .iter()
            .filter(|model| model.is_trivial())
            .map(|model| {
                Diagnostic::warning(
                    self.name(),
                    format!("builder '{}' exposes no attributes", model.builder.name),
                )
                .at(&model.builder.qualified)
            })
            .collect();
        ctx.diagnostics.extend(trivial);

        ctx.targets = Some(targets);
        Ok(())
    }
}
