//! Pipeline phase trait.

use eyre::Result;

use super::CompilationContext;

/// Name and description of a phase, for `explain`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// A phase in the extraction pipeline.
///
/// Phases run in order. Each reads the outputs of earlier phases from the
/// context and stores its own. A phase whose input is missing fails with an
/// error naming the phase it depends on. Non-fatal findings are recorded as
/// diagnostics instead.
pub trait Phase: Send + Sync {
    /// The name of this phase (used in diagnostics, plugin hooks and snapshots).
    fn name(&self) -> &'static str;

    /// A human-readable description of what this phase does.
    fn description(&self) -> &'static str;

    /// Run this phase on the compilation context.
    fn run(&self, ctx: &mut CompilationContext) -> Result<()>;

    fn info(&self) -> PhaseInfo {
        PhaseInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
