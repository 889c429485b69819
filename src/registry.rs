//! # Dependency Registry
//!
//! Maps symbolic dependency shortcuts (`guava`, `junit`, ...) to exact Maven
//! coordinates with a curated version and a default scope, and collects the
//! resolved dependencies of a run into an ordered, conflict-checked
//! [`DependencySet`].
//!
//! ## Resolution
//!
//! - A known symbol resolves to its curated coordinate. Symbols are matched
//!   with `_` and `-` treated as equivalent, so `slf4j_test` and `slf4j-test`
//!   name the same entry.
//! - An unknown symbol needs an explicit `group:artifact[:version]`
//!   coordinate. A coordinate without a version borrows the curated version
//!   of the registry entry with the same group and artifact.
//! - The caller's scope wins; otherwise the entry's default scope is used,
//!   and `main` for explicit coordinates.
//!
//! ## Uniqueness
//!
//! A [`DependencySet`] never holds two entries with the same group, artifact
//! and scope. Identical redeclarations collapse, a redeclaration carrying an
//! explicit version override replaces the earlier version in place, and any
//! other version mismatch is a [`Error::VersionConflict`]. Versions are never
//! silently coerced.

use std::collections::BTreeMap;
use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::suggestions::find_similar;

/// Classification of where a dependency applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Main,
    Test,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Main => f.write_str("main"),
            Scope::Test => f.write_str("test"),
        }
    }
}

/// A `group:artifact[:version]` library identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
    pub version: Option<String>,
}

impl Coordinate {
    /// Parse a `group:artifact` or `group:artifact:version` string.
    ///
    /// Returns `None` when the string has the wrong number of segments or an
    /// empty segment.
    pub fn parse(text: &str) -> Option<Self> {
        let parts: Vec<&str> = text.trim().split(':').collect();
        if parts.iter().any(|p| p.trim().is_empty()) {
            return None;
        }
        match parts.as_slice() {
            [group, artifact] => Some(Self {
                group: group.trim().to_string(),
                artifact: artifact.trim().to_string(),
                version: None,
            }),
            [group, artifact, version] => Some(Self {
                group: group.trim().to_string(),
                artifact: artifact.trim().to_string(),
                version: Some(version.trim().to_string()),
            }),
            _ => None,
        }
    }

    /// The `group:artifact` part, used as the identity of a library.
    pub fn key(&self) -> String {
        format!("{}:{}", self.group, self.artifact)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}:{}:{}", self.group, self.artifact, version),
            None => write!(f, "{}:{}", self.group, self.artifact),
        }
    }
}

/// A fully resolved dependency declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub group: String,
    pub artifact: String,
    pub version: String,
    pub scope: Scope,
    /// Set when the declaration carried an explicit version override.
    pub pinned: bool,
}

impl Dependency {
    /// The `group:artifact` identity of this dependency.
    pub fn key(&self) -> String {
        format!("{}:{}", self.group, self.artifact)
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{} ({})",
            self.group, self.artifact, self.version, self.scope
        )
    }
}

/// A curated registry entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    pub group: String,
    pub artifact: String,
    pub version: String,
    pub scope: Scope,
}

// symbol, group, artifact, version, default scope
const BUILTIN: &[(&str, &str, &str, &str, Scope)] = &[
    ("noexception", "com.machinezoo.noexception", "noexception", "1.7.1", Scope::Main),
    ("noexception-slf4j", "com.machinezoo.noexception", "noexception-slf4j", "1.7.1", Scope::Main),
    ("stagean", "com.machinezoo.stagean", "stagean", "1.1.0", Scope::Main),
    ("fastutil", "it.unimi.dsi", "fastutil", "8.5.4", Scope::Main),
    ("guava", "com.google.guava", "guava", "30.1.1-jre", Scope::Main),
    ("slf4j", "org.slf4j", "slf4j-api", "1.7.30", Scope::Main),
    ("commons-io", "commons-io", "commons-io", "2.8.0", Scope::Main),
    ("commons-lang", "org.apache.commons", "commons-lang3", "3.12.0", Scope::Main),
    ("junit", "org.junit.jupiter", "junit-jupiter", "5.7.1", Scope::Test),
    ("hamcrest", "org.hamcrest", "hamcrest", "2.2", Scope::Test),
    ("slf4j-test", "com.github.valfirst", "slf4j-test", "2.3.0", Scope::Test),
];

/// Table of known dependency symbols.
///
/// The registry is read-only once a run starts; profiles extend it through
/// [`Registry::with_entry`] before resolution begins.
#[derive(Debug, Clone)]
pub struct Registry {
    entries: BTreeMap<String, RegistryEntry>,
}

fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_lowercase().replace('_', "-")
}

impl Registry {
    /// The registry with the curated built-in symbols.
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(symbol, group, artifact, version, scope)| {
                (
                    symbol.to_string(),
                    RegistryEntry {
                        group: group.to_string(),
                        artifact: artifact.to_string(),
                        version: version.to_string(),
                        scope: *scope,
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Add or re-curate a symbol.
    pub fn with_entry(mut self, symbol: &str, entry: RegistryEntry) -> Self {
        self.entries.insert(normalize_symbol(symbol), entry);
        self
    }

    /// Look up a symbol.
    pub fn lookup(&self, symbol: &str) -> Option<&RegistryEntry> {
        self.entries.get(&normalize_symbol(symbol))
    }

    /// All known symbols in sorted order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    fn lookup_coordinate(&self, coordinate: &Coordinate) -> Option<&RegistryEntry> {
        self.entries
            .values()
            .find(|e| e.group == coordinate.group && e.artifact == coordinate.artifact)
    }

    /// Resolve a symbol, optionally with an explicit coordinate, into a
    /// dependency.
    ///
    /// An explicit coordinate takes precedence over the symbol's curated
    /// coordinate. Fails with [`Error::UnresolvedDependency`] when neither
    /// yields a complete coordinate.
    pub fn resolve(
        &self,
        symbol: &str,
        coordinate: Option<&Coordinate>,
        scope: Option<Scope>,
    ) -> Result<Dependency> {
        let entry = self.lookup(symbol);
        let dependency = match (coordinate, entry) {
            (Some(coordinate), _) => {
                let curated = self.lookup_coordinate(coordinate);
                let version = match (&coordinate.version, curated) {
                    (Some(version), _) => version.clone(),
                    (None, Some(curated)) => curated.version.clone(),
                    (None, None) => {
                        return Err(Error::UnresolvedDependency {
                            symbol: symbol.to_string(),
                            message: format!("no version given for {} and none curated", coordinate),
                            hint: Some("Add the version as group:artifact:version".to_string()),
                        })
                    }
                };
                Dependency {
                    group: coordinate.group.clone(),
                    artifact: coordinate.artifact.clone(),
                    version,
                    scope: scope
                        .or_else(|| curated.map(|c| c.scope))
                        .unwrap_or(Scope::Main),
                    pinned: false,
                }
            }
            (None, Some(entry)) => Dependency {
                group: entry.group.clone(),
                artifact: entry.artifact.clone(),
                version: entry.version.clone(),
                scope: scope.unwrap_or(entry.scope),
                pinned: false,
            },
            (None, None) => {
                let normalized = normalize_symbol(symbol);
                let known: Vec<&str> = self.symbols().collect();
                let hint = find_similar(&normalized, &known)
                    .map(|s| format!("Did you mean '{}'?", s))
                    .unwrap_or_else(|| {
                        "Use an explicit coordinate such as group:artifact:version".to_string()
                    });
                return Err(Error::UnresolvedDependency {
                    symbol: symbol.to_string(),
                    message: "unknown symbol and no coordinate given".to_string(),
                    hint: Some(hint),
                });
            }
        };
        debug!("Resolved dependency '{}' to {}", symbol, dependency);
        Ok(dependency)
    }

    /// Resolve a declaration entry, which is either a symbol or a coordinate
    /// string, applying an optional explicit version override.
    pub fn resolve_entry(
        &self,
        entry: &str,
        scope: Option<Scope>,
        version: Option<&str>,
    ) -> Result<Dependency> {
        let mut dependency = if entry.contains(':') {
            let coordinate = Coordinate::parse(entry).ok_or_else(|| Error::UnresolvedDependency {
                symbol: entry.to_string(),
                message: "malformed coordinate".to_string(),
                hint: Some("Expected group:artifact or group:artifact:version".to_string()),
            })?;
            self.resolve(entry, Some(&coordinate), scope)?
        } else {
            self.resolve(entry, None, scope)?
        };
        if let Some(version) = version {
            dependency.version = version.to_string();
            dependency.pinned = true;
        }
        Ok(dependency)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Ordered, conflict-checked collection of resolved dependencies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    entries: Vec<Dependency>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dependency, enforcing uniqueness per (group, artifact, scope).
    pub fn insert(&mut self, dependency: Dependency) -> Result<()> {
        let existing = self.entries.iter_mut().find(|d| {
            d.group == dependency.group
                && d.artifact == dependency.artifact
                && d.scope == dependency.scope
        });
        match existing {
            None => self.entries.push(dependency),
            Some(existing) if existing.version == dependency.version => {
                debug!("Collapsed duplicate declaration of {}", dependency);
                existing.pinned |= dependency.pinned;
            }
            Some(existing) if existing.pinned && dependency.pinned => {
                return Err(Error::VersionConflict {
                    coordinate: existing.key(),
                    scope: existing.scope,
                    first: existing.version.clone(),
                    second: dependency.version,
                });
            }
            Some(existing) if dependency.pinned => {
                debug!(
                    "Version of {} overridden from {} to {}",
                    dependency.key(),
                    existing.version,
                    dependency.version
                );
                existing.version = dependency.version;
                existing.pinned = true;
            }
            Some(existing) => {
                return Err(Error::VersionConflict {
                    coordinate: existing.key(),
                    scope: existing.scope,
                    first: existing.version.clone(),
                    second: dependency.version,
                });
            }
        }
        Ok(())
    }

    /// All dependencies in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Dependency> {
        self.entries.iter()
    }

    /// Dependencies of one scope in declaration order.
    pub fn in_scope(&self, scope: Scope) -> impl Iterator<Item = &Dependency> {
        self.entries.iter().filter(move |d| d.scope == scope)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
