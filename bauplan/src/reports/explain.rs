//! Explain command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

#[derive(Debug)]
pub struct ExplainReport {
    pub config_path: PathBuf,
    pub source_prefix: String,
    pub phases: Vec<PhaseInfo>,
    pub targets: Vec<TargetTree>,
}

#[derive(Debug)]
pub struct PhaseInfo {
    pub name: String,
    pub description: String,
}

/// A target with its rendered model tree.
#[derive(Debug)]
pub struct TargetTree {
    pub tree: String,
}

impl Report for ExplainReport {
    fn render(&self, out: &mut dyn Output) {
        out.title("Bauplan Pipeline Explanation");
        out.newline();

        out.key_value("Input", &self.config_path.display().to_string());
        out.key_value_indented("Source prefix", &self.source_prefix);
        out.newline();

        out.section("Pipeline Phases");
        for (i, phase) in self.phases.iter().enumerate() {
            out.numbered_item(i + 1, &format!("{} - {}", phase.name, phase.description));
        }
        out.newline();

        if self.targets.is_empty() {
            out.section("Targets (none found)");
            return;
        }

        out.section(&format!("Targets ({})", self.targets.len()));
        for target in &self.targets {
            out.preformatted(&target.tree);
            out.newline();
        }
    }
}
