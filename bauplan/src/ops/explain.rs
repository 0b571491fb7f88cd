//! Explain operation - pipeline phases and per-target model trees.

use bauplan_manifest::BauplanToml;
use bauplan_model::{TargetDisplay, pipeline::Pipeline};
use eyre::Result;

use crate::reports::{ExplainReport, PhaseInfo, TargetTree};

pub fn explain(toml: &BauplanToml) -> Result<ExplainReport> {
    let pipeline = Pipeline::new();
    let phases: Vec<PhaseInfo> = pipeline
        .phase_info()
        .into_iter()
        .map(|p| PhaseInfo {
            name: p.name.to_string(),
            description: p.description.to_string(),
        })
        .collect();

    let ctx = super::run_pipeline(toml, pipeline)?;
    let targets = ctx
        .targets
        .iter()
        .flat_map(|models| models.iter())
        .map(|model| TargetTree {
            tree: TargetDisplay::new(model).indent("  ").to_string(),
        })
        .collect();

    Ok(ExplainReport {
        config_path: toml.path().to_path_buf(),
        source_prefix: toml.manifest().source.prefix.clone(),
        phases,
        targets,
    })
}
