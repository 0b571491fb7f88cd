mod commands;
mod logging;
mod ops;
mod reports;

use clap::Parser;
use eyre::Result;

use crate::commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    logging::init_tracing();

    Cli::parse().run()
}
