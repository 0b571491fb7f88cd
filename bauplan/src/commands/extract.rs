use std::path::PathBuf;

use bauplan_manifest::BauplanToml;
use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    ops::{self, ExtractOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ExtractCommand {
    /// Path to bauplan.toml (defaults to ./bauplan.toml)
    #[arg(short, long, default_value = "bauplan.toml")]
    pub config: PathBuf,

    /// Output directory (defaults to [target].output in bauplan.toml)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the model to stdout without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Write a JSON snapshot after each phase to <output>/.bauplan/debug
    #[arg(long)]
    pub visualize: bool,
}

impl ExtractCommand {
    pub fn run(&self) -> Result<()> {
        let toml = BauplanToml::open(&self.config).unwrap_or_exit();
        let output_dir = self.output.clone().unwrap_or_else(|| toml.output_dir());

        let report = ops::extract(
            &toml,
            ExtractOptions {
                output_dir: &output_dir,
                dry_run: self.dry_run,
                visualize: self.visualize,
            },
        )?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
