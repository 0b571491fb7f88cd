//! The `model.json` document written by `bauplan extract`.

use eyre::Result;
use serde::Serialize;

use crate::{TargetModels, dsl::DslModel, pipeline::CompilationContext};

/// Everything a renderer needs: the target models and their DSL projection.
#[derive(Debug, Serialize)]
pub struct ModelDocument<'a> {
    pub source_prefix: &'a str,
    pub target_prefix: String,
    pub targets: &'a TargetModels,
    pub dsl: &'a DslModel,
}

impl<'a> ModelDocument<'a> {
    /// Borrow the outputs of a completed pipeline run.
    pub fn from_context(ctx: &'a CompilationContext) -> Result<Self> {
        let targets = ctx
            .targets
            .as_ref()
            .ok_or_else(|| eyre::eyre!("targets not set - pipeline did not run AssemblePhase"))?;
        let dsl = ctx
            .dsl
            .as_ref()
            .ok_or_else(|| eyre::eyre!("DSL model not set - pipeline did not run LowerPhase"))?;

        Ok(Self {
            source_prefix: &ctx.manifest.source.prefix,
            target_prefix: ctx.manifest.target_prefix(),
            targets,
            dsl,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}
