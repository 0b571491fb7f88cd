//! Info operation - summary of the extracted model.

use bauplan_manifest::BauplanToml;
use bauplan_model::{ParamShape, pipeline::Pipeline};
use eyre::Result;

use crate::reports::{InfoReport, Stats, TargetInfo};

pub fn info(toml: &BauplanToml) -> Result<InfoReport> {
    let ctx = super::run_pipeline(toml, Pipeline::new())?;
    let manifest = toml.manifest();

    let mut stats = Stats {
        types: ctx.universe.declared_len(),
        ..Stats::default()
    };
    if let Some(index) = &ctx.index {
        stats.indexed_types = index.type_count();
        stats.methods = index.method_count();
    }

    let mut targets = Vec::new();
    if let Some(models) = &ctx.targets {
        for model in models.iter() {
            stats.attributes += model.attributes.len();
            stats.nested += model.nested.len();
            stats.usages += model.usages.len();
            targets.push(TargetInfo {
                name: model.target.name.clone(),
                package: model.target.package.clone(),
                attributes: model.groups.len(),
                nested: model.nested.len(),
                used_in_collections: model.usages.iter().any(|u| u.shape == ParamShape::Collection),
                used_in_maps: model.usages.iter().any(|u| u.shape == ParamShape::Map),
            });
        }
    }
    if let Some(dsl) = &ctx.dsl {
        stats.collections = dsl.collections.len();
        stats.maps = dsl.maps.len();
    }

    Ok(InfoReport {
        config_path: std::fs::canonicalize(toml.path()).unwrap_or_else(|_| toml.path().to_path_buf()),
        source_prefix: manifest.source.prefix.clone(),
        target_prefix: manifest.target_prefix(),
        universe_path: toml.universe_path(),
        stats,
        targets,
        warnings: ctx.warning_count(),
    })
}
