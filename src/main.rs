//! # Repo Scaffold CLI
//!
//! Binary entry point for the `repo-scaffold` command-line tool. Parses the
//! arguments and dispatches to a command; all the work happens in the
//! `repo_scaffold` library. Every error exits with status 1.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
