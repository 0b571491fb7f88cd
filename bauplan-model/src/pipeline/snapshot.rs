//! Phase snapshot plugin for visualization and debugging.
//!
//! Captures the context's outputs after each phase so the intermediate
//! models can be inspected with `bauplan extract --visualize`.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
};

use eyre::{Result, WrapErr};
use serde::Serialize;

use super::{CompilationContext, Diagnostic, Plugin};
use crate::{Discovery, MethodIndex, TargetModels, dsl::DslModel};

/// The pipeline state right after a phase completed.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseSnapshot {
    pub phase: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<MethodIndex>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub discovery: Option<Discovery>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets: Option<TargetModels>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dsl: Option<DslModel>,

    /// Diagnostics collected so far.
    pub diagnostics: Vec<Diagnostic>,
}

impl PhaseSnapshot {
    fn write(&self, dir: &Path) -> Result<()> {
        let path = dir.join(format!("{}.json", self.phase));
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json).wrap_err_with(|| format!("failed to write {}", path.display()))
    }
}

/// A plugin that captures pipeline state after each phase.
///
/// # Example
///
/// ```ignore
/// let snapshots = Arc::new(SnapshotPlugin::new());
/// let ctx = Pipeline::new().plugin(snapshots.clone()).run(manifest, inputs)?;
///
/// snapshots.write_to_dir(".bauplan/debug")?;
/// ```
pub struct SnapshotPlugin {
    snapshots: RwLock<Vec<PhaseSnapshot>>,
    /// When set, each snapshot is written as soon as its phase completes.
    output_dir: Option<PathBuf>,
}

impl SnapshotPlugin {
    pub fn new() -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: None,
        }
    }

    /// Create a snapshot plugin that writes `<phase>.json` files into a directory.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: Some(output_dir.into()),
        }
    }

    pub fn snapshots(&self) -> Vec<PhaseSnapshot> {
        self.snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Write all collected snapshots to `dir`.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        for snapshot in self
            .snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
        {
            snapshot.write(dir)?;
        }

        Ok(())
    }

    fn capture(&self, phase: &str, ctx: &CompilationContext) -> PhaseSnapshot {
        PhaseSnapshot {
            phase: phase.to_string(),
            index: ctx.index.clone(),
            discovery: ctx.discovery.clone(),
            targets: ctx.targets.clone(),
            dsl: ctx.dsl.clone(),
            diagnostics: ctx.diagnostics.clone(),
        }
    }
}

impl Default for SnapshotPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SnapshotPlugin {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        let snapshot = self.capture(phase, ctx);

        if let Some(ref dir) = self.output_dir {
            fs::create_dir_all(dir)?;
            snapshot.write(dir)?;
            tracing::debug!(phase, dir = %dir.display(), "wrote phase snapshot");
        }

        self.snapshots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(snapshot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bauplan_universe::DocSource;

    use super::*;
    use crate::{
        Inputs,
        pipeline::{
            Pipeline,
            phases::test_support::{manifest, universe_fixture},
        },
    };

    fn inputs() -> Inputs {
        Inputs::new(universe_fixture(), DocSource::new())
    }

    #[test]
    fn test_snapshot_plugin_creation() {
        let plugin = SnapshotPlugin::new();
        assert!(plugin.snapshots().is_empty());
    }

    #[test]
    fn test_snapshots_track_phase_outputs() {
        let plugin = Arc::new(SnapshotPlugin::new());
        Pipeline::new()
            .plugin(plugin.clone())
            .run(manifest(), inputs())
            .unwrap();

        let snapshots = plugin.snapshots();
        let phases: Vec<_> = snapshots.iter().map(|s| s.phase.as_str()).collect();
        assert_eq!(phases, ["index", "discover", "classify", "assemble", "lower"]);

        assert!(snapshots[0].index.is_some());
        assert!(snapshots[0].discovery.is_none());
        assert!(snapshots[3].targets.is_some());
        assert!(snapshots[3].dsl.is_none());
        assert!(snapshots[4].dsl.is_some());
    }

    #[test]
    fn test_output_dir_receives_one_file_per_phase() {
        let dir = tempfile::tempdir().unwrap();
        let debug = dir.path().join("debug");
        Pipeline::new()
            .plugin(SnapshotPlugin::with_output_dir(&debug))
            .run(manifest(), inputs())
            .unwrap();

        for phase in ["index", "discover", "classify", "assemble", "lower"] {
            assert!(debug.join(format!("{phase}.json")).is_file(), "{phase}");
        }

        let lower = fs::read_to_string(debug.join("lower.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&lower).unwrap();
        assert_eq!(json["phase"], "lower");
        assert_eq!(json["dsl"]["scope"]["name"], "XDsl");
    }

    #[test]
    fn test_write_to_dir() {
        let plugin = Arc::new(SnapshotPlugin::new());
        Pipeline::new()
            .plugin(plugin.clone())
            .run(manifest(), inputs())
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        plugin.write_to_dir(dir.path()).unwrap();
        assert!(dir.path().join("assemble.json").is_file());
    }
}
