//! Placeholder expansion for profile values.
//!
//! Profile strings may reference `{name}` and `{jdk}`. Anything else inside
//! braces that looks like a placeholder is rejected with a render error
//! rather than copied into an artifact.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid placeholder regex"));

/// Variables available to profile templates.
#[derive(Debug, Clone, Default)]
pub struct Placeholders {
    vars: BTreeMap<String, String>,
}

impl Placeholders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.vars.insert(name.to_string(), value.into());
        self
    }

    /// Expand every placeholder in `text`. `subject` names the attribute for
    /// error messages.
    pub fn expand(&self, subject: &str, text: &str) -> Result<String> {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for caps in PLACEHOLDER.captures_iter(text) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let name = name.as_str();
            let value = self.vars.get(name).ok_or_else(|| {
                Error::render(subject, format!("unknown placeholder '{{{}}}' in '{}'", name, text))
            })?;
            out.push_str(&text[last..whole.start()]);
            out.push_str(value);
            last = whole.end();
        }
        out.push_str(&text[last..]);
        Ok(out)
    }
}
