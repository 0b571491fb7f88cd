//! Check operation - run the pipeline and collect diagnostics.

use bauplan_manifest::BauplanToml;
use bauplan_model::pipeline::{Pipeline, Severity};
use eyre::Result;

use crate::reports::CheckReport;

pub fn check(toml: &BauplanToml) -> Result<CheckReport> {
    let ctx = super::run_pipeline(toml, Pipeline::new())?;

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    for diag in &ctx.diagnostics {
        let msg = if let Some(loc) = &diag.location {
            format!("[{}] {}\n  --> {}", diag.phase, diag.message, loc)
        } else {
            format!("[{}] {}", diag.phase, diag.message)
        };

        match diag.severity {
            Severity::Error => errors.push(msg),
            Severity::Warning => warnings.push(msg),
            Severity::Info => infos.push(msg),
        }
    }

    Ok(CheckReport {
        config_path: toml.path().to_path_buf(),
        target_count: ctx.targets.as_ref().map_or(0, |t| t.len()),
        errors,
        warnings,
        infos,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::fixture::project;

    #[test]
    fn test_check_collects_diagnostics() {
        let dir = tempfile::tempdir().unwrap();
        let report = check(&project(dir.path(), "")).unwrap();

        assert!(report.is_valid());
        assert_eq!(report.target_count, 2);
        assert_eq!(
            report.warnings,
            ["[assemble] builder 'Bar.Builder' exposes no attributes\n  --> com.x.Bar$Builder"]
        );
        assert!(report.infos[0].starts_with("[index] indexed"));
    }

    #[test]
    fn test_check_reports_missing_docs() {
        let dir = tempfile::tempdir().unwrap();
        let report = check(&project(dir.path(), "docs = \"missing.json\"\n")).unwrap();

        assert!(report.warnings[0].starts_with("[load] documentation unavailable"));
    }

    #[test]
    fn test_check_fails_without_universe() {
        let dir = tempfile::tempdir().unwrap();
        let toml = project(dir.path(), "universe = \"elsewhere.json\"\n");

        assert!(check(&toml).is_err());
    }
}
