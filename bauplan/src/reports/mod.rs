//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Operations build reports, then commands render them to an Output target.

mod check;
mod explain;
mod extract;
mod info;
mod init;
mod output;

pub use check::CheckReport;
pub use explain::{ExplainReport, PhaseInfo, TargetTree};
pub use extract::{ExtractReport, ExtractResult, WrittenResult};
pub use info::{InfoReport, Stats, TargetInfo};
pub use init::InitReport;
pub use output::{Report, TerminalOutput};

#[cfg(test)]
pub(crate) use output::testing::render_to_string;
