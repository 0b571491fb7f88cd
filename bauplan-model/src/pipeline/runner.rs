//! Pipeline orchestrator.

use bauplan_manifest::Manifest;
use eyre::Result;

use super::{
    CompilationContext, Phase, PhaseInfo, Plugin,
    phases::{AssemblePhase, ClassifyPhase, DiscoverPhase, IndexPhase, LowerPhase},
};
use crate::Inputs;

fn builtin_phases() -> Vec<Box<dyn Phase>> {
    vec![
        Box::new(IndexPhase),
        Box::new(DiscoverPhase),
        Box::new(ClassifyPhase),
        Box::new(AssemblePhase),
        Box::new(LowerPhase),
    ]
}

/// The extraction pipeline orchestrator.
///
/// Runs the built-in phases (index, discover, classify, assemble, lower)
/// followed by any user phases, calling plugin hooks before and after each.
///
/// # Example
///
/// ```ignore
/// let snapshots = SnapshotPlugin::with_output_dir(".bauplan/debug");
/// let ctx = Pipeline::new()
///     .plugin(snapshots)
///     .run(manifest, inputs)?;
/// ```
pub struct Pipeline {
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Name and description of every phase, in execution order.
    pub fn phase_info(&self) -> Vec<PhaseInfo> {
        builtin_phases()
            .iter()
            .chain(self.phases.iter())
            .map(|phase| phase.info())
            .collect()
    }

    /// Run every phase over the loaded inputs.
    ///
    /// Diagnostics raised while loading the inputs are carried into the
    /// context ahead of the phases' own.
    ///
    /// # Errors
    ///
    /// Returns an error if any phase or plugin hook fails.
    pub fn run(&self, manifest: Manifest, inputs: Inputs) -> Result<CompilationContext> {
        let Inputs {
            universe,
            docs,
            diagnostics,
        } = inputs;
        let mut ctx = CompilationContext::new(manifest, universe, docs);
        ctx.diagnostics.extend(diagnostics);

        for phase in builtin_phases().iter().chain(self.phases.iter()) {
            self.run_phase(phase.as_ref(), &mut ctx)?;
        }

        Ok(ctx)
    }

    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompilationContext) -> Result<()> {
        let phase_name = phase.name();
        let _span = tracing::debug_span!("phase", name = phase_name).entered();

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        phase.run(ctx)?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
