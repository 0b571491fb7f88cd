//! Extract operation - write the model document for renderers.

use std::path::Path;

use bauplan_core::File;
use bauplan_manifest::BauplanToml;
use bauplan_model::{
    ModelDocument,
    pipeline::{Pipeline, SnapshotPlugin},
};
use eyre::{Context, Result};

use crate::reports::{ExtractReport, ExtractResult, WrittenResult};

pub const MODEL_FILE: &str = "model.json";
pub const DEBUG_DIR: &str = ".bauplan/debug";

/// Options for the extract operation.
pub struct ExtractOptions<'a> {
    pub output_dir: &'a Path,
    /// Print the document instead of writing it.
    pub dry_run: bool,
    /// Write per-phase snapshots under the output directory.
    pub visualize: bool,
}

pub fn extract(toml: &BauplanToml, opts: ExtractOptions) -> Result<ExtractReport> {
    let debug_dir = opts.output_dir.join(DEBUG_DIR);
    let mut pipeline = Pipeline::new();
    if opts.visualize {
        pipeline = pipeline.plugin(SnapshotPlugin::with_output_dir(&debug_dir));
    }
    let ctx = super::run_pipeline(toml, pipeline)?;

    let warnings: Vec<String> = ctx.warnings().map(|d| d.to_string()).collect();
    let document = ModelDocument::from_context(&ctx)?;
    let json = document.to_json()?;

    let result = if opts.dry_run {
        ExtractResult::Preview(json)
    } else {
        let path = opts.output_dir.join(MODEL_FILE);
        File::new(&path, json)
            .write()
            .wrap_err("Failed to write model")?;
        tracing::debug!(path = %path.display(), "wrote model");

        ExtractResult::Written(WrittenResult {
            model_path: path,
            debug_dir: opts.visualize.then_some(debug_dir),
        })
    };

    Ok(ExtractReport {
        target_count: document.targets.len(),
        type_dsl_count: document.dsl.types.len(),
        warnings,
        result,
    })
}
