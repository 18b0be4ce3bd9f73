//! ## sintax-cli
//! **Command-line frontend for tax-scenario runs**
//!
//! Collects a scenario from the config hierarchy and flags, runs the
//! population engine, and prints or exports the year-by-year table.

use clap::Parser;

mod commands;
mod printing;

use commands::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    commands::run_command(cli).await
}
