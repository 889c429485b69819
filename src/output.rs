//! # Output Configuration
//!
//! Controls how the CLI reports artifacts: colored status words and emoji
//! when the terminal supports them, plain bracketed tags otherwise.
//!
//! The following are respected, in order:
//! - `--color=never|always|auto`
//! - `NO_COLOR` (any value, including empty)
//! - `CLICOLOR=0`
//! - `CLICOLOR_FORCE=1`, even when stdout is not a TTY
//! - `TERM=dumb`

use std::env;
use std::path::Path;

use console::style;

use crate::reconcile::Outcome;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    /// Resolve the `--color` flag against the environment.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };
        Self { use_color }
    }

    fn detect_color_support() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }
        console::Term::stdout().features().colors_supported()
    }

    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Emoji when colors are enabled, `plain` otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// One report line for an artifact, e.g. `  created  pom.xml`.
pub fn artifact_line(config: &OutputConfig, outcome: Outcome, path: &Path) -> String {
    let word = format!("{:>9}", outcome.to_string());
    let word = if config.use_color {
        match outcome {
            Outcome::Create => style(word).green().to_string(),
            Outcome::Update => style(word).yellow().to_string(),
            Outcome::Unchanged => style(word).dim().to_string(),
        }
    } else {
        word
    };
    format!("{}  {}", word, path.display())
}
