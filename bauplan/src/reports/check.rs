//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Diagnostics from a pipeline run.
#[derive(Debug)]
pub struct CheckReport {
    pub config_path: PathBuf,
    pub target_count: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.warning(&format!("error: {}", error));
        }

        for warning in &self.warnings {
            out.warning(&format!("warning: {}", warning));
        }

        for info in &self.infos {
            out.preformatted(&format!("info: {}", info));
        }

        if !self.warnings.is_empty() || !self.errors.is_empty() {
            out.newline();
        }

        if self.is_valid() {
            out.preformatted(&format!(
                "✓ {} is valid ({} target{})",
                self.config_path.display(),
                self.target_count,
                if self.target_count == 1 { "" } else { "s" }
            ));
        }
    }
}
