//! # Error Handling
//!
//! This module defines the centralized error type for `repo-scaffold`. It uses
//! the `thiserror` library to build a single `Error` enum whose variants follow
//! the failure taxonomy of a generation run:
//!
//! - **Configuration**: a required attribute is missing, a declaration or
//!   profile cannot be parsed, or the engine profile cannot be located.
//! - **UnresolvedDependency**: an unknown dependency symbol was used without
//!   an explicit coordinate.
//! - **VersionConflict**: the same coordinate was declared twice in the same
//!   scope with different versions.
//! - **DuplicateLink**: a link catalog received the same label twice.
//! - **Render**: an artifact could not be synthesized from the descriptor.
//! - **MergeConflict**: an on-disk artifact contains manual edits that the
//!   new rendering would destroy.
//!
//! All of them are fatal to a run. Nothing is retried or downgraded to a
//! warning, and no artifact is written after the first failure.
//!
//! The `Result` type alias is used throughout the library.

use std::path::PathBuf;

use thiserror::Error;

use crate::links::LinkKind;
use crate::registry::Scope;

/// Main error type for repo-scaffold operations
#[derive(Error, Debug)]
pub enum Error {
    /// A required attribute is missing or a configuration source is unusable.
    ///
    /// `subject` names the failing attribute or file.
    #[error("Configuration error: {subject}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Configuration {
        subject: String,
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A dependency symbol is unknown and no coordinate was supplied.
    #[error("Unresolved dependency: {symbol}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    UnresolvedDependency {
        symbol: String,
        message: String,
        hint: Option<String>,
    },

    /// The same coordinate was requested with two different versions.
    #[error("Version conflict: {coordinate} ({scope}) declared as both {first} and {second}")]
    VersionConflict {
        coordinate: String,
        scope: Scope,
        first: String,
        second: String,
    },

    /// A link catalog already contains an entry with this label.
    #[error("Duplicate link: {kind} catalog already contains label '{label}'")]
    DuplicateLink { kind: LinkKind, label: String },

    /// An artifact could not be rendered.
    #[error("Render error: {artifact}: {message}")]
    Render { artifact: String, message: String },

    /// Reconciliation would destroy a manually edited region.
    #[error("Merge conflict: {}: {message}", path.display())]
    MergeConflict { path: PathBuf, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Shorthand for a configuration error without a hint.
    pub fn configuration(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Configuration {
            subject: subject.into(),
            message: message.into(),
            hint: None,
        }
    }

    /// Shorthand for a render error.
    pub fn render(artifact: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Render {
            artifact: artifact.into(),
            message: message.into(),
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
