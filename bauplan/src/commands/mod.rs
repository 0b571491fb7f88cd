mod check;
mod completions;
mod explain;
mod extract;
mod info;
mod init;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use explain::ExplainCommand;
use extract::ExtractCommand;
use info::InfoCommand;
use init::InitCommand;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for bauplan_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "bauplan")]
#[command(version)]
#[command(about = "Extract builder/target models from a type universe")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Init(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Info(cmd) => cmd.run(),
            Commands::Explain(cmd) => cmd.run(),
            Commands::Extract(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter bauplan.toml
    Init(InitCommand),

    /// Run the pipeline and report diagnostics without writing anything
    Check(CheckCommand),

    /// Summarize the extracted model
    Info(InfoCommand),

    /// Show the pipeline phases and every target's model
    Explain(ExplainCommand),

    /// Write model.json for renderers
    Extract(ExtractCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_extract_flags() {
        let cli = Cli::try_parse_from([
            "bauplan",
            "extract",
            "-c",
            "sdk/bauplan.toml",
            "-o",
            "out",
            "--dry-run",
            "--visualize",
        ])
        .unwrap();

        let Commands::Extract(cmd) = cli.command else {
            panic!("expected extract");
        };
        assert_eq!(cmd.config.to_str(), Some("sdk/bauplan.toml"));
        assert_eq!(cmd.output.as_deref().and_then(|p| p.to_str()), Some("out"));
        assert!(cmd.dry_run);
        assert!(cmd.visualize);
    }
}
