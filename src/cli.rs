//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Repo Scaffold - Generate Java project configuration from a declaration
#[derive(Parser, Debug)]
#[command(name = "repo-scaffold")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute (defaults to generate)
    #[command(subcommand)]
    command: Option<Commands>,

    // Used when no subcommand is given.
    #[command(flatten)]
    generate: commands::generate::GenerateArgs,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Regenerate the project artifacts from .scaffold.yaml
    Generate(commands::generate::GenerateArgs),

    /// Verify that the generated artifacts are up to date
    Check(commands::check::CheckArgs),
}

impl Cli {
    /// Initialize logging and execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        match self.command {
            Some(Commands::Generate(args)) => commands::generate::execute(args, &self.color),
            Some(Commands::Check(args)) => commands::check::execute(args, &self.color),
            None => commands::generate::execute(self.generate, &self.color),
        }
    }
}

/// `RUST_LOG` takes precedence over `--log-level`.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
