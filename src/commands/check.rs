//! # Check Command Implementation
//!
//! Renders and plans every artifact without writing anything. Exits
//! non-zero when an artifact on disk differs from what `generate` would
//! write, which makes it suitable for CI and pre-commit hooks.

use anyhow::Result;
use clap::Args;

use repo_scaffold::output::{artifact_line, emoji, OutputConfig};
use repo_scaffold::pipeline;
use repo_scaffold::suggestions;

use super::RunArgs;

/// Verify that the generated artifacts are up to date
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub run: RunArgs,
}

/// Execute the `check` command.
pub fn execute(args: CheckArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let options = args.run.options()?;
    let report = pipeline::check(&options)?;
    let drifted = report.drifted();

    if drifted.is_empty() {
        if !args.run.quiet {
            println!(
                "{} {} artifacts are up to date",
                emoji(&out, "✅", "[OK]"),
                report.plans.len()
            );
        }
        return Ok(());
    }

    if !args.run.quiet {
        for plan in &drifted {
            println!("{}", artifact_line(&out, plan.outcome, &plan.relative));
        }
    }
    let paths: Vec<_> = drifted.iter().map(|p| p.relative.clone()).collect();
    Err(suggestions::artifacts_out_of_date(&paths))
}
