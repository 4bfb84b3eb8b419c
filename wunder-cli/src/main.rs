//! Binary crate for the `wunder` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and merging them with stored preferences
//! - Logging setup
//! - Printing the weather report

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
