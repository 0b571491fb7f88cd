//! Extraction pipeline.
//!
//! A [`Pipeline`] runs the extraction stages as phases over a shared
//! [`CompilationContext`]:
//!
//! - Explicit phase boundaries (index → discover → classify → assemble → lower)
//! - Plugin hooks before and after each phase
//! - Diagnostics collected alongside the models
//!
//! # Example
//!
//! ```ignore
//! use bauplan_model::{Inputs, pipeline::Pipeline};
//!
//! let inputs = Inputs::load(&toml)?;
//! let ctx = Pipeline::new().run(toml.manifest().clone(), inputs)?;
//!
//! for diag in ctx.warnings() {
//!     eprintln!("{}", diag);
//! }
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;
mod snapshot;

pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::{Phase, PhaseInfo};
pub use plugin::Plugin;
pub use runner::Pipeline;
pub use snapshot::{PhaseSnapshot, SnapshotPlugin};
