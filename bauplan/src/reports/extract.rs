//! Extract command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

#[derive(Debug)]
pub struct ExtractReport {
    pub target_count: usize,
    pub type_dsl_count: usize,
    pub warnings: Vec<String>,
    pub result: ExtractResult,
}

#[derive(Debug)]
pub enum ExtractResult {
    /// The model was written to disk.
    Written(WrittenResult),
    /// Dry run: the model document as it would be written.
    Preview(String),
}

#[derive(Debug)]
pub struct WrittenResult {
    pub model_path: PathBuf,
    /// Where phase snapshots went, if visualization was enabled.
    pub debug_dir: Option<PathBuf>,
}

impl Report for ExtractReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        match &self.result {
            // stdout carries only the document so it can be piped
            ExtractResult::Preview(json) => out.preformatted(json.trim_end()),
            ExtractResult::Written(written) => {
                if let Some(debug_dir) = &written.debug_dir {
                    out.key_value(
                        "Pipeline snapshots written to",
                        &debug_dir.display().to_string(),
                    );
                    out.newline();
                }
                out.key_value(
                    "Extracted",
                    &format!(
                        "{} targets, {} type DSLs",
                        self.target_count, self.type_dsl_count
                    ),
                );
                out.added_item(&written.model_path.display().to_string());
            }
        }
    }
}
