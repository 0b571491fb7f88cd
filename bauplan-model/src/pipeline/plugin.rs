//! Pipeline plugin trait.

use std::sync::Arc;

use eyre::Result;

use super::CompilationContext;

/// Hooks called around every phase.
///
/// # Example
///
/// ```ignore
/// struct TimingPlugin {
///     started: Mutex<Option<Instant>>,
/// }
///
/// impl Plugin for TimingPlugin {
///     fn name(&self) -> &'static str { "timing" }
///
///     fn on_before_phase(&self, _phase: &str, _ctx: &mut CompilationContext) -> Result<()> {
///         *self.started.lock().unwrap() = Some(Instant::now());
///         Ok(())
///     }
///
///     fn on_after_phase(&self, phase: &str, _ctx: &mut CompilationContext) -> Result<()> {
///         if let Some(start) = *self.started.lock().unwrap() {
///             eprintln!("{} took {:?}", phase, start.elapsed());
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;

    /// Called before a phase runs. Returning an error aborts the pipeline.
    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }

    /// Called after a phase completes. Returning an error aborts the pipeline.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }
}

/// Lets a caller keep a handle to a plugin after handing it to a pipeline.
impl<P: Plugin + ?Sized> Plugin for Arc<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn on_before_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        (**self).on_before_phase(phase, ctx)
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        (**self).on_after_phase(phase, ctx)
    }
}
