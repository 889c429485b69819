//! # Engine Profile
//!
//! The profile carries everything a repository inherits without declaring
//! it: ecosystem-wide defaults, defaults for members of the umbrella project,
//! and extra curated dependency symbols. A profile is YAML; one is compiled
//! into the binary and others are found through [`crate::locate`].
//!
//! ```yaml
//! ecosystem:
//!   group_id: "com.example.{name}"
//!   jdk_version: 17
//!   javadoc_links:
//!     - { label: "Java SE {jdk}", url: "https://docs.oracle.com/en/java/javase/{jdk}/docs/api/" }
//! member:
//!   homepage: "https://{name}.example.com/"
//! registry:
//!   jackson: { coordinate: "com.fasterxml.jackson.core:jackson-databind:2.12.3" }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::declaration::DependencySpec;
use crate::error::{Error, Result};
use crate::links::LinkSpec;
use crate::registry::{Coordinate, Registry, RegistryEntry, Scope};

const BUILTIN_PROFILE: &str = include_str!("profiles/default.yaml");

/// Source name used for the compiled-in profile in messages.
pub const BUILTIN_PROFILE_NAME: &str = "<builtin profile>";

/// License rendered into the project descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct License {
    pub name: String,
    pub url: String,
}

/// One layer of defaults (ecosystem or project family).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileDefaults {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub scm_url: Option<String>,
    #[serde(default)]
    pub license: Option<License>,
    #[serde(default)]
    pub jdk_version: Option<u32>,
    #[serde(default)]
    pub annotations: Option<bool>,
    #[serde(default)]
    pub complete_javadoc: Option<bool>,
    #[serde(default)]
    pub dependencies: Vec<DependencySpec>,
    #[serde(default)]
    pub javadoc_links: Vec<LinkSpec>,
    #[serde(default)]
    pub documentation_links: Vec<LinkSpec>,
}

/// An extra registry symbol defined by a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrySpec {
    /// Full `group:artifact:version` coordinate.
    pub coordinate: String,
    #[serde(default)]
    pub scope: Option<Scope>,
}

/// Ecosystem and family defaults plus registry extensions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ecosystem: ProfileDefaults,
    /// Defaults for members of the umbrella project.
    #[serde(default)]
    pub member: ProfileDefaults,
    #[serde(default)]
    pub registry: BTreeMap<String, RegistrySpec>,
}

impl Profile {
    /// The profile compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_PROFILE_NAME, BUILTIN_PROFILE)
    }

    /// Parse a profile from YAML text. `source` names it in errors.
    pub fn parse(source: &str, yaml_content: &str) -> Result<Self> {
        serde_yaml::from_str(yaml_content).map_err(|e| Error::Configuration {
            subject: source.to_string(),
            message: format!("invalid engine profile: {}", e),
            hint: None,
        })
    }

    /// Read and parse a profile file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration(
                path.display().to_string(),
                format!("cannot read engine profile: {}", e),
            )
        })?;
        Self::parse(&path.display().to_string(), &content)
    }

    /// The built-in registry extended with this profile's symbols.
    pub fn registry(&self) -> Result<Registry> {
        let mut registry = Registry::builtin();
        for (symbol, spec) in &self.registry {
            let coordinate = Coordinate::parse(&spec.coordinate)
                .and_then(|c| c.version.clone().map(|version| (c, version)));
            let (coordinate, version) = coordinate.ok_or_else(|| Error::Configuration {
                subject: format!("registry.{}", symbol),
                message: format!("'{}' is not a group:artifact:version coordinate", spec.coordinate),
                hint: None,
            })?;
            registry = registry.with_entry(
                symbol,
                RegistryEntry {
                    group: coordinate.group,
                    artifact: coordinate.artifact,
                    version,
                    scope: spec.scope.unwrap_or(Scope::Main),
                },
            );
        }
        Ok(registry)
    }
}
