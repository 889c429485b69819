//! # Generate Command Implementation
//!
//! Runs the full pipeline and writes every artifact that changed. Also the
//! command that runs when `repo-scaffold` is invoked without a subcommand.

use anyhow::Result;
use clap::Args;

use repo_scaffold::output::{artifact_line, emoji, OutputConfig};
use repo_scaffold::pipeline;

use super::RunArgs;

/// Regenerate the project artifacts from .scaffold.yaml
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub run: RunArgs,
}

/// Execute the `generate` command.
pub fn execute(args: GenerateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let options = args.run.options()?;
    let report = pipeline::generate(&options)?;

    if args.run.quiet {
        return Ok(());
    }
    for plan in &report.plans {
        println!("{}", artifact_line(&out, plan.outcome, &plan.relative));
    }
    let changed = report.drifted().len();
    if changed == 0 {
        println!(
            "{} {} is up to date",
            emoji(&out, "✅", "[OK]"),
            report.repository_name
        );
    } else {
        println!(
            "{} {} artifact(s) written for {}",
            emoji(&out, "✨", "[DONE]"),
            changed,
            report.repository_name
        );
    }
    Ok(())
}
