//! # Declaration Schema and Parsing
//!
//! This module defines the `.scaffold.yaml` file a repository uses to declare
//! its identity and dependency needs, and the logic for parsing it.
//!
//! ## Schema Generations
//!
//! Three generations of the declaration format are accepted so that older
//! repositories keep working without modification:
//!
//! 1.  **Generation 1**: flat keys `name`, `description`, `year`, `jdk`,
//!     `dependencies` and `javadoc_links`. No documentation links or flags.
//! 2.  **Generation 2**: flat keys named after the override hooks
//!     (`repository_name`, `pom_description`, `jdk_version`,
//!     `is_member_project`, ...), including both link sequences and flags.
//! 3.  **Generation 3** (current): `schema: 3`, a nested `project` mapping
//!     and top-level `dependencies`, `javadoc_links` and
//!     `documentation_links`.
//!
//! The generation comes from the `schema` key, or is inferred when the key is
//! absent. Each generation is parsed into its own raw struct and migrated
//! into a single [`Declaration`], so nothing downstream of this module needs
//! to know which generation a repository uses. Attributes a generation lacks
//! stay `None` and take their defaults during resolution.
//!
//! Unknown keys are logged and ignored.

use std::fmt;
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};
use crate::links::LinkSpec;
use crate::registry::{Dependency, Registry, Scope};

/// A dependency as written in a declaration or profile.
///
/// Accepts a symbol or coordinate string, an `[entry, scope]` pair, or a
/// `{use, scope, version}` mapping where `version` is an explicit override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DependencySpec {
    Entry(String),
    Scoped(String, Scope),
    Detailed {
        #[serde(rename = "use")]
        entry: String,
        #[serde(default)]
        scope: Option<Scope>,
        #[serde(default)]
        version: Option<String>,
    },
}

impl DependencySpec {
    /// Shorthand for a plain symbol or coordinate entry.
    pub fn entry(text: &str) -> Self {
        DependencySpec::Entry(text.to_string())
    }

    /// Resolve through the registry.
    pub fn resolve(&self, registry: &Registry) -> Result<Dependency> {
        match self {
            DependencySpec::Entry(entry) => registry.resolve_entry(entry, None, None),
            DependencySpec::Scoped(entry, scope) => registry.resolve_entry(entry, Some(*scope), None),
            DependencySpec::Detailed {
                entry,
                scope,
                version,
            } => registry.resolve_entry(entry, *scope, version.as_deref()),
        }
    }
}

/// Which declaration format a repository was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum SchemaGeneration {
    V1,
    V2,
    #[default]
    V3,
}

impl SchemaGeneration {
    /// The newest generation this engine understands.
    pub const CURRENT: SchemaGeneration = SchemaGeneration::V3;

    fn from_number(number: u64) -> Option<Self> {
        match number {
            1 => Some(SchemaGeneration::V1),
            2 => Some(SchemaGeneration::V2),
            3 => Some(SchemaGeneration::V3),
            _ => None,
        }
    }
}

impl fmt::Display for SchemaGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaGeneration::V1 => f.write_str("1"),
            SchemaGeneration::V2 => f.write_str("2"),
            SchemaGeneration::V3 => f.write_str("3"),
        }
    }
}

/// Repository overrides in the current schema.
///
/// Every identity attribute is optional here; the declaration model fills in
/// family and ecosystem defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declaration {
    /// The generation the source file was written in.
    pub generation: SchemaGeneration,
    pub repository_name: Option<String>,
    pub pretty_name: Option<String>,
    pub description: Option<String>,
    pub inception_year: Option<u16>,
    pub jdk_version: Option<u32>,
    pub member: Option<bool>,
    pub annotations: Option<bool>,
    pub complete_javadoc: Option<bool>,
    pub group_id: Option<String>,
    pub version: Option<String>,
    pub homepage: Option<String>,
    pub scm_url: Option<String>,
    pub dependencies: Vec<DependencySpec>,
    pub javadoc_links: Vec<LinkSpec>,
    pub documentation_links: Vec<LinkSpec>,
}

////// RAW GENERATIONS //////

#[derive(Debug, Deserialize)]
struct DeclarationV1 {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    year: Option<u16>,
    #[serde(default)]
    jdk: Option<u32>,
    #[serde(default)]
    dependencies: Vec<DependencySpec>,
    #[serde(default)]
    javadoc_links: Vec<LinkSpec>,
}

const V1_KEYS: &[&str] = &[
    "schema",
    "name",
    "description",
    "year",
    "jdk",
    "dependencies",
    "javadoc_links",
];

#[derive(Debug, Deserialize)]
struct DeclarationV2 {
    #[serde(default)]
    repository_name: Option<String>,
    #[serde(default)]
    pretty_name: Option<String>,
    #[serde(default)]
    pom_description: Option<String>,
    #[serde(default)]
    inception_year: Option<u16>,
    #[serde(default)]
    jdk_version: Option<u32>,
    #[serde(default)]
    is_member_project: Option<bool>,
    #[serde(default)]
    stagean_annotations: Option<bool>,
    #[serde(default)]
    complete_javadoc: Option<bool>,
    #[serde(default)]
    dependencies: Vec<DependencySpec>,
    #[serde(default)]
    javadoc_links: Vec<LinkSpec>,
    #[serde(default)]
    documentation_links: Vec<LinkSpec>,
}

const V2_KEYS: &[&str] = &[
    "schema",
    "repository_name",
    "pretty_name",
    "pom_description",
    "inception_year",
    "jdk_version",
    "is_member_project",
    "stagean_annotations",
    "complete_javadoc",
    "dependencies",
    "javadoc_links",
    "documentation_links",
];

#[derive(Debug, Default, Deserialize)]
struct ProjectV3 {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    pretty_name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    inception_year: Option<u16>,
    #[serde(default)]
    jdk: Option<u32>,
    #[serde(default)]
    member: Option<bool>,
    #[serde(default)]
    annotations: Option<bool>,
    #[serde(default)]
    complete_javadoc: Option<bool>,
    #[serde(default)]
    group_id: Option<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    homepage: Option<String>,
    #[serde(default)]
    scm_url: Option<String>,
}

const V3_PROJECT_KEYS: &[&str] = &[
    "name",
    "pretty_name",
    "description",
    "inception_year",
    "jdk",
    "member",
    "annotations",
    "complete_javadoc",
    "group_id",
    "version",
    "homepage",
    "scm_url",
];

#[derive(Debug, Deserialize)]
struct DeclarationV3 {
    #[serde(default)]
    project: ProjectV3,
    #[serde(default)]
    dependencies: Vec<DependencySpec>,
    #[serde(default)]
    javadoc_links: Vec<LinkSpec>,
    #[serde(default)]
    documentation_links: Vec<LinkSpec>,
}

const V3_KEYS: &[&str] = &[
    "schema",
    "project",
    "dependencies",
    "javadoc_links",
    "documentation_links",
];

////// MIGRATIONS //////

impl From<DeclarationV1> for Declaration {
    fn from(raw: DeclarationV1) -> Self {
        Declaration {
            generation: SchemaGeneration::V1,
            repository_name: raw.name,
            description: raw.description,
            inception_year: raw.year,
            jdk_version: raw.jdk,
            dependencies: raw.dependencies,
            javadoc_links: raw.javadoc_links,
            ..Default::default()
        }
    }
}

impl From<DeclarationV2> for Declaration {
    fn from(raw: DeclarationV2) -> Self {
        Declaration {
            generation: SchemaGeneration::V2,
            repository_name: raw.repository_name,
            pretty_name: raw.pretty_name,
            description: raw.pom_description,
            inception_year: raw.inception_year,
            jdk_version: raw.jdk_version,
            member: raw.is_member_project,
            annotations: raw.stagean_annotations,
            complete_javadoc: raw.complete_javadoc,
            dependencies: raw.dependencies,
            javadoc_links: raw.javadoc_links,
            documentation_links: raw.documentation_links,
            ..Default::default()
        }
    }
}

impl From<DeclarationV3> for Declaration {
    fn from(raw: DeclarationV3) -> Self {
        let project = raw.project;
        Declaration {
            generation: SchemaGeneration::V3,
            repository_name: project.name,
            pretty_name: project.pretty_name,
            description: project.description,
            inception_year: project.inception_year,
            jdk_version: project.jdk,
            member: project.member,
            annotations: project.annotations,
            complete_javadoc: project.complete_javadoc,
            group_id: project.group_id,
            version: project.version,
            homepage: project.homepage,
            scm_url: project.scm_url,
            dependencies: raw.dependencies,
            javadoc_links: raw.javadoc_links,
            documentation_links: raw.documentation_links,
        }
    }
}

////// PARSING //////

fn detect_generation(source: &str, map: &Mapping) -> Result<SchemaGeneration> {
    match map.get("schema") {
        Some(Value::Number(number)) => number
            .as_u64()
            .and_then(SchemaGeneration::from_number)
            .ok_or_else(|| Error::Configuration {
                subject: source.to_string(),
                message: format!("unsupported declaration schema {}", number),
                hint: Some(format!(
                    "This engine understands schema 1 through {}",
                    SchemaGeneration::CURRENT
                )),
            }),
        Some(_) => Err(Error::configuration(
            source,
            "the 'schema' key must be an integer",
        )),
        None if map.contains_key("project") => Ok(SchemaGeneration::V3),
        None if map.contains_key("repository_name") => Ok(SchemaGeneration::V2),
        None => Ok(SchemaGeneration::V1),
    }
}

fn warn_unknown_keys(source: &str, map: &Mapping, known: &[&str], context: &str) {
    for key in map.keys() {
        let name = key.as_str().unwrap_or("<non-string key>");
        if !known.contains(&name) {
            warn!("Ignoring unknown key '{}' in {} of {}", name, context, source);
        }
    }
}

fn from_value<T: for<'de> Deserialize<'de>>(source: &str, value: Value) -> Result<T> {
    serde_yaml::from_value(value).map_err(|e| Error::configuration(source, e.to_string()))
}

/// Parse a declaration from YAML text.
///
/// `source` names the file in error messages.
pub fn parse(source: &str, yaml_content: &str) -> Result<Declaration> {
    let value: Value = serde_yaml::from_str(yaml_content).map_err(|e| Error::Configuration {
        subject: source.to_string(),
        message: format!("invalid YAML: {}", e),
        hint: None,
    })?;
    let map = match &value {
        Value::Mapping(map) => map.clone(),
        Value::Null => Mapping::new(),
        _ => {
            return Err(Error::Configuration {
                subject: source.to_string(),
                message: "expected a mapping of declaration attributes".to_string(),
                hint: Some("Start the file with 'schema: 3' and a 'project:' mapping".to_string()),
            })
        }
    };

    let generation = detect_generation(source, &map)?;
    debug!("Parsing {} as declaration schema {}", source, generation);

    let value = Value::Mapping(map.clone());
    let declaration = match generation {
        SchemaGeneration::V1 => {
            warn_unknown_keys(source, &map, V1_KEYS, "declaration");
            Declaration::from(from_value::<DeclarationV1>(source, value)?)
        }
        SchemaGeneration::V2 => {
            warn_unknown_keys(source, &map, V2_KEYS, "declaration");
            Declaration::from(from_value::<DeclarationV2>(source, value)?)
        }
        SchemaGeneration::V3 => {
            warn_unknown_keys(source, &map, V3_KEYS, "declaration");
            if let Some(Value::Mapping(project)) = map.get("project") {
                warn_unknown_keys(source, project, V3_PROJECT_KEYS, "project");
            }
            Declaration::from(from_value::<DeclarationV3>(source, value)?)
        }
    };
    Ok(declaration)
}

/// Read and parse a declaration file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Declaration> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| Error::Configuration {
        subject: path.display().to_string(),
        message: format!("cannot read declaration: {}", e),
        hint: None,
    })?;
    parse(&path.display().to_string(), &content)
}
