//! # repo-fleet CLI
//!
//! Binary entry point for the `repo-fleet` command-line tool. Parses
//! arguments with `clap`, initializes logging, and dispatches to the command
//! implementations. The core logic lives in the library crate; the binary is
//! a thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
