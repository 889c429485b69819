//! # Engine Profile Discovery
//!
//! A repository does not carry the shared engine profile itself; the profile
//! is located through an explicit [`SearchPath`] checked in order:
//!
//! 1.  **Injected**: a path passed on the command line or through
//!     `SCAFFOLD_PROFILE`. If it is given but missing, discovery fails
//!     instead of falling through to a profile the caller did not ask for.
//! 2.  **Sibling**: `../repo-scaffold/profile.yaml` next to the repository
//!     checkout, for workspaces that keep the shared engine checked out
//!     alongside the repositories it configures.
//! 3.  **Registered**: `<user config dir>/repo-scaffold/profile.yaml`.
//! 4.  **Builtin**: the profile compiled into the binary.
//!
//! A search path with no usable entry is a configuration error listing every
//! location that was tried.

use std::fmt;
use std::path::{Path, PathBuf};

use log::debug;

use crate::defaults;
use crate::error::{Error, Result};
use crate::profile::{Profile, BUILTIN_PROFILE_NAME};

/// One place a profile may be found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEntry {
    Injected(PathBuf),
    Sibling(PathBuf),
    Registered(PathBuf),
    Builtin,
}

impl fmt::Display for SearchEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchEntry::Injected(path) => write!(f, "injected {}", path.display()),
            SearchEntry::Sibling(path) => write!(f, "sibling {}", path.display()),
            SearchEntry::Registered(path) => write!(f, "registered {}", path.display()),
            SearchEntry::Builtin => f.write_str(BUILTIN_PROFILE_NAME),
        }
    }
}

/// A loaded profile together with where it came from.
#[derive(Debug, Clone)]
pub struct LocatedProfile {
    pub profile: Profile,
    pub source: SearchEntry,
}

/// Ordered list of profile locations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    entries: Vec<SearchEntry>,
}

impl SearchPath {
    /// An empty search path.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard search path for a repository rooted at `root`.
    pub fn standard(injected: Option<PathBuf>, root: &Path) -> Self {
        Self::with_registered(injected, root, defaults::registered_profile_path())
    }

    /// The standard search path with an explicit registered location, or
    /// none at all.
    pub fn with_registered(
        injected: Option<PathBuf>,
        root: &Path,
        registered: Option<PathBuf>,
    ) -> Self {
        let mut path = Self::new();
        if let Some(injected) = injected {
            path = path.with(SearchEntry::Injected(injected));
        }
        if let Some(parent) = root.parent() {
            path = path.with(SearchEntry::Sibling(
                parent
                    .join(defaults::ENGINE_DIR_NAME)
                    .join(defaults::PROFILE_FILE_NAME),
            ));
        }
        if let Some(registered) = registered {
            path = path.with(SearchEntry::Registered(registered));
        }
        path.with(SearchEntry::Builtin)
    }

    pub fn with(mut self, entry: SearchEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    /// Load the first usable profile.
    pub fn locate(&self) -> Result<LocatedProfile> {
        for entry in &self.entries {
            let profile = match entry {
                SearchEntry::Injected(path) => {
                    if !path.is_file() {
                        return Err(Error::Configuration {
                            subject: path.display().to_string(),
                            message: "injected engine profile does not exist".to_string(),
                            hint: Some("Check --profile or SCAFFOLD_PROFILE".to_string()),
                        });
                    }
                    Profile::from_file(path)?
                }
                SearchEntry::Sibling(path) | SearchEntry::Registered(path) => {
                    if !path.is_file() {
                        debug!("No engine profile at {}", entry);
                        continue;
                    }
                    Profile::from_file(path)?
                }
                SearchEntry::Builtin => Profile::builtin()?,
            };
            debug!("Using engine profile from {}", entry);
            return Ok(LocatedProfile {
                profile,
                source: entry.clone(),
            });
        }

        let searched = self
            .entries
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Err(Error::Configuration {
            subject: "engine profile".to_string(),
            message: format!(
                "not found; searched: {}",
                if searched.is_empty() { "nothing" } else { &searched }
            ),
            hint: Some("Pass --profile or install a profile in a searched location".to_string()),
        })
    }
}
