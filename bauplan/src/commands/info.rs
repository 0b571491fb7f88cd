use std::path::PathBuf;

use bauplan_manifest::BauplanToml;
use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct InfoCommand {
    /// Path to bauplan.toml (defaults to ./bauplan.toml)
    #[arg(short, long, default_value = "bauplan.toml")]
    pub config: PathBuf,
}

impl InfoCommand {
    pub fn run(&self) -> Result<()> {
        let toml = BauplanToml::open(&self.config).unwrap_or_exit();

        let report = ops::info(&toml)?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
