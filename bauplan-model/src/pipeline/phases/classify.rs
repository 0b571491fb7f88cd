//! Classify phase - flags builder methods and buildable parameters.

use eyre::Result;

use crate::{
    Classifier, ParamShape,
    pipeline::{CompilationContext, Phase},
};

pub struct ClassifyPhase;

impl Phase for ClassifyPhase {
    fn name(&self) -> &'static str {
        "classify"
    }

    fn description(&self) -> &'static str {
        "Flag builder-returning methods and classify buildable parameters"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let discovery = ctx.discovery.as_ref().ok_or_else(|| {
            eyre::eyre!("discovery not set - ClassifyPhase must run after DiscoverPhase")
        })?;
        let index = ctx
            .index
            .as_mut()
            .ok_or_else(|| eyre::eyre!("index not set - ClassifyPhase must run after IndexPhase"))?;

        Classifier::new(&ctx.universe, discovery, &ctx.manifest.model).classify(index);

        tracing::debug!(
            builder_methods = index.iter().filter(|m| m.is_builder_method).count(),
            buildable_params = index.iter().filter(|m| m.shape != ParamShape::None).count(),
            "classified methods"
        );
        Ok(())
    }
}
