//! Default values for repo-scaffold.
//!
//! This module provides centralized default names and locations used across
//! the library and the commands, ensuring consistency and avoiding
//! duplication.

use std::path::PathBuf;

/// Declaration file at the repository root.
pub const DECLARATION_FILE_NAME: &str = ".scaffold.yaml";

/// Directory name of the shared engine checkout and of the registered
/// profile directory.
pub const ENGINE_DIR_NAME: &str = "repo-scaffold";

/// Profile file name inside an engine directory.
pub const PROFILE_FILE_NAME: &str = "profile.yaml";

/// Generated Maven project descriptor.
pub const POM_PATH: &str = "pom.xml";

/// Generated javadoc links index.
pub const JAVADOC_LINKS_PATH: &str = "docs/javadoc-links.md";

/// Generated documentation links index.
pub const DOCUMENTATION_LINKS_PATH: &str = "docs/documentation-links.md";

/// Returns the registered profile location.
///
/// Uses the platform-appropriate configuration directory:
/// - Linux: `~/.config/repo-scaffold/profile.yaml` (XDG Base Directory)
/// - macOS: `~/Library/Application Support/repo-scaffold/profile.yaml`
/// - Windows: `{FOLDERID_RoamingAppData}\repo-scaffold\profile.yaml`
///
/// Returns `None` when the platform directory cannot be determined.
pub fn registered_profile_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(ENGINE_DIR_NAME).join(PROFILE_FILE_NAME))
}
