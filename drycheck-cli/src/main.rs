//! Binary crate for the `drycheck` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Logging setup
//! - Interactive configuration
//! - Wiring config, weather source and notifier into the poll loop

use clap::Parser;

mod cli;
mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
