//! # CLI Command Implementations
//!
//! Each subcommand of `repo-scaffold` lives in its own file with an `Args`
//! struct derived with `clap` and an `execute` function that calls into the
//! `repo_scaffold` library.

pub mod check;
pub mod generate;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use repo_scaffold::pipeline::Options;
use repo_scaffold::suggestions;

/// Options shared by every command that runs the pipeline.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Repository root the artifacts are generated under.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Declaration file (defaults to .scaffold.yaml under the root).
    #[arg(short, long, value_name = "FILE", env = "SCAFFOLD_DECLARATION")]
    pub declaration: Option<PathBuf>,

    /// Engine profile to use instead of searching for one.
    #[arg(short, long, value_name = "FILE", env = "SCAFFOLD_PROFILE")]
    pub profile: Option<PathBuf>,

    /// Suppress all output except errors.
    #[arg(short, long)]
    pub quiet: bool,
}

impl RunArgs {
    /// Pipeline options, failing early when the declaration is missing.
    pub fn options(&self) -> Result<Options> {
        let mut options = Options::new(&self.root);
        if let Some(declaration) = &self.declaration {
            options = options.with_declaration(declaration);
        }
        if let Some(profile) = &self.profile {
            options = options.with_profile(profile);
        }
        let declaration = options.declaration_path();
        if !declaration.is_file() {
            return Err(suggestions::declaration_not_found(&declaration));
        }
        Ok(options)
    }
}
