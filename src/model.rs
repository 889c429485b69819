//! # Declaration Model
//!
//! Layers a repository's [`Declaration`] over the engine [`Profile`] and
//! exposes one accessor per configurable attribute. Each scalar attribute
//! resolves in this order:
//!
//! 1.  the repository's own override,
//! 2.  the `member` family default, only when the repository is a member of
//!     the umbrella project,
//! 3.  the ecosystem default,
//! 4.  a built-in fallback where one exists (the pretty name falls back to
//!     the repository name, the description to an empty string).
//!
//! Sequence attributes are the ecosystem base, then the family base, then
//! entries implied by flags, then the repository's additions. Relative order
//! is preserved within each segment.
//!
//! Profile values may contain `{name}` and `{jdk}` placeholders; repository
//! values are used verbatim.
//!
//! The model never mutates its inputs. [`DeclarationModel::resolve`] produces
//! the immutable [`Resolution`] that the synthesizer renders.

use log::debug;

use crate::declaration::{Declaration, DependencySpec};
use crate::error::{Error, Result};
use crate::links::{has_line_break, Catalogs, LinkCatalog, LinkKind, LinkSpec};
use crate::profile::{License, Profile, ProfileDefaults};
use crate::registry::{DependencySet, Registry};
use crate::template::Placeholders;

/// Symbol added to the dependencies when annotations are enabled.
const ANNOTATIONS_SYMBOL: &str = "stagean";

fn single_line_error(attribute: &str) -> Error {
    Error::Configuration {
        subject: attribute.to_string(),
        message: "must not contain line breaks".to_string(),
        hint: None,
    }
}

/// Resolved identity of one repository for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDescriptor {
    pub repository_name: String,
    pub pretty_name: String,
    pub description: String,
    pub inception_year: Option<u16>,
    pub jdk_version: Option<u32>,
    pub member: bool,
    pub annotations: bool,
    pub complete_javadoc: bool,
    pub group_id: Option<String>,
    pub version: Option<String>,
    pub homepage: Option<String>,
    pub scm_url: Option<String>,
    pub license: Option<License>,
}

/// Everything the synthesizer needs for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub descriptor: ProjectDescriptor,
    pub dependencies: DependencySet,
    pub catalogs: Catalogs,
}

/// A declaration layered over profile defaults.
#[derive(Debug)]
pub struct DeclarationModel<'a> {
    declaration: &'a Declaration,
    profile: &'a Profile,
    registry: Registry,
}

impl<'a> DeclarationModel<'a> {
    pub fn new(declaration: &'a Declaration, profile: &'a Profile) -> Result<Self> {
        Ok(Self {
            declaration,
            profile,
            registry: profile.registry()?,
        })
    }

    /// Layers consulted after the repository override, most specific first.
    fn layers(&self) -> Vec<&'a ProfileDefaults> {
        if self.member() {
            vec![&self.profile.member, &self.profile.ecosystem]
        } else {
            vec![&self.profile.ecosystem]
        }
    }

    /// Base layers in sequence order, ecosystem first.
    fn base_layers(&self) -> Vec<&'a ProfileDefaults> {
        let mut layers = self.layers();
        layers.reverse();
        layers
    }

    fn layered<T, F>(&self, own: &Option<T>, pick: F) -> Option<T>
    where
        T: Clone,
        F: Fn(&ProfileDefaults) -> &Option<T>,
    {
        own.clone()
            .or_else(|| self.layers().into_iter().find_map(|l| pick(l).clone()))
    }

    /// Like [`Self::layered`] for strings, expanding placeholders in profile
    /// values.
    fn layered_text<F>(&self, attribute: &str, own: &Option<String>, pick: F) -> Result<Option<String>>
    where
        F: Fn(&ProfileDefaults) -> &Option<String>,
    {
        if let Some(own) = own {
            return Ok(Some(own.clone()));
        }
        match self.layers().into_iter().find_map(|l| pick(l).clone()) {
            Some(template) => Ok(Some(self.placeholders()?.expand(attribute, &template)?)),
            None => Ok(None),
        }
    }

    fn placeholders(&self) -> Result<Placeholders> {
        let mut placeholders = Placeholders::new().with("name", self.repository_name()?);
        if let Some(jdk) = self.jdk_version() {
            placeholders = placeholders.with("jdk", jdk.to_string());
        }
        Ok(placeholders)
    }

    /// The repository name. Required and never defaulted.
    pub fn repository_name(&self) -> Result<String> {
        match &self.declaration.repository_name {
            Some(name) if has_line_break(name) => Err(single_line_error("repository_name")),
            Some(name) if !name.trim().is_empty() => Ok(name.trim().to_string()),
            _ => Err(Error::Configuration {
                subject: "repository_name".to_string(),
                message: "must be declared and non-empty".to_string(),
                hint: Some("Set project.name in .scaffold.yaml".to_string()),
            }),
        }
    }

    /// Whether the repository belongs to the umbrella project.
    pub fn member(&self) -> bool {
        self.declaration.member.unwrap_or(false)
    }

    pub fn pretty_name(&self) -> Result<String> {
        match &self.declaration.pretty_name {
            Some(pretty) if has_line_break(pretty) => Err(single_line_error("pretty_name")),
            Some(pretty) if !pretty.trim().is_empty() => Ok(pretty.trim().to_string()),
            _ => self.repository_name(),
        }
    }

    pub fn description(&self) -> Result<String> {
        Ok(self
            .layered_text("description", &self.declaration.description, |l| &l.description)?
            .unwrap_or_default())
    }

    pub fn inception_year(&self) -> Option<u16> {
        self.declaration.inception_year
    }

    pub fn jdk_version(&self) -> Option<u32> {
        self.layered(&self.declaration.jdk_version, |l| &l.jdk_version)
    }

    pub fn annotations(&self) -> bool {
        self.layered(&self.declaration.annotations, |l| &l.annotations)
            .unwrap_or(false)
    }

    pub fn complete_javadoc(&self) -> bool {
        self.layered(&self.declaration.complete_javadoc, |l| &l.complete_javadoc)
            .unwrap_or(true)
    }

    pub fn group_id(&self) -> Result<Option<String>> {
        self.layered_text("group_id", &self.declaration.group_id, |l| &l.group_id)
    }

    pub fn version(&self) -> Result<Option<String>> {
        self.layered_text("version", &self.declaration.version, |l| &l.version)
    }

    pub fn homepage(&self) -> Result<Option<String>> {
        self.layered_text("homepage", &self.declaration.homepage, |l| &l.homepage)
    }

    pub fn scm_url(&self) -> Result<Option<String>> {
        self.layered_text("scm_url", &self.declaration.scm_url, |l| &l.scm_url)
    }

    pub fn license(&self) -> Option<License> {
        self.layers().into_iter().find_map(|l| l.license.clone())
    }

    /// Base dependencies followed by the repository's own, resolved and
    /// checked for conflicts.
    pub fn dependencies(&self) -> Result<DependencySet> {
        let mut specs: Vec<&DependencySpec> = Vec::new();
        for layer in self.base_layers() {
            specs.extend(layer.dependencies.iter());
        }
        let annotations = DependencySpec::entry(ANNOTATIONS_SYMBOL);
        if self.annotations() {
            specs.push(&annotations);
        }
        specs.extend(self.declaration.dependencies.iter());

        let mut set = DependencySet::new();
        for spec in specs {
            set.insert(spec.resolve(&self.registry)?)?;
        }
        debug!("Resolved {} dependencies", set.len());
        Ok(set)
    }

    fn catalog<F>(&self, kind: LinkKind, pick: F, own: &[LinkSpec]) -> Result<LinkCatalog>
    where
        F: Fn(&ProfileDefaults) -> &Vec<LinkSpec>,
    {
        let placeholders = self.placeholders()?;
        let mut catalog = LinkCatalog::new(kind);
        for layer in self.base_layers() {
            for spec in pick(layer) {
                catalog.push(spec.to_entry(kind, |text| placeholders.expand(kind.attribute(), text))?)?;
            }
        }
        for spec in own {
            catalog.push(spec.to_entry(kind, |text| Ok(text.to_string()))?)?;
        }
        Ok(catalog)
    }

    pub fn javadoc_links(&self) -> Result<LinkCatalog> {
        self.catalog(
            LinkKind::Javadoc,
            |l| &l.javadoc_links,
            &self.declaration.javadoc_links,
        )
    }

    pub fn documentation_links(&self) -> Result<LinkCatalog> {
        self.catalog(
            LinkKind::Documentation,
            |l| &l.documentation_links,
            &self.declaration.documentation_links,
        )
    }

    /// Resolve every identity attribute.
    pub fn descriptor(&self) -> Result<ProjectDescriptor> {
        Ok(ProjectDescriptor {
            repository_name: self.repository_name()?,
            pretty_name: self.pretty_name()?,
            description: self.description()?,
            inception_year: self.inception_year(),
            jdk_version: self.jdk_version(),
            member: self.member(),
            annotations: self.annotations(),
            complete_javadoc: self.complete_javadoc(),
            group_id: self.group_id()?,
            version: self.version()?,
            homepage: self.homepage()?,
            scm_url: self.scm_url()?,
            license: self.license(),
        })
    }

    /// Resolve the descriptor, dependencies and link catalogs.
    pub fn resolve(&self) -> Result<Resolution> {
        let descriptor = self.descriptor()?;
        debug!(
            "Resolved descriptor for '{}' (declaration schema {})",
            descriptor.repository_name, self.declaration.generation
        );
        Ok(Resolution {
            descriptor,
            dependencies: self.dependencies()?,
            catalogs: Catalogs {
                javadoc: self.javadoc_links()?,
                documentation: self.documentation_links()?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration;
    use crate::registry::Scope;

    fn empty_profile() -> Profile {
        Profile::default()
    }

    fn named(name: &str) -> Declaration {
        Declaration {
            repository_name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_repository_name_is_configuration_error() {
        let profile = empty_profile();
        let declaration = Declaration::default();
        let model = DeclarationModel::new(&declaration, &profile).unwrap();
        let err = model.resolve().unwrap_err();
        match err {
            Error::Configuration { subject, .. } => assert_eq!(subject, "repository_name"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_blank_repository_name_is_configuration_error() {
        let profile = empty_profile();
        let declaration = named("   ");
        let model = DeclarationModel::new(&declaration, &profile).unwrap();
        assert!(matches!(
            model.repository_name(),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_pretty_name_falls_back_to_repository_name() {
        let profile = empty_profile();
        let declaration = named("hookless");
        let model = DeclarationModel::new(&declaration, &profile).unwrap();
        assert_eq!(model.pretty_name().unwrap(), "hookless");
        assert_eq!(model.description().unwrap(), "");
    }

    #[test]
    fn test_multiline_pretty_name_is_configuration_error() {
        let profile = empty_profile();
        let mut declaration = named("hookless");
        declaration.pretty_name = Some("Hook\n<!-- scaffold:manual:end notes -->".to_string());
        let model = DeclarationModel::new(&declaration, &profile).unwrap();
        match model.resolve().unwrap_err() {
            Error::Configuration { subject, .. } => assert_eq!(subject, "pretty_name"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_resolution_chain_prefers_override_then_family_then_ecosystem() {
        let profile = Profile::parse(
            "p",
            r#"
ecosystem:
  homepage: "https://github.com/example/{name}"
  scm_url: "https://github.com/example/{name}"
  jdk_version: 11
member:
  homepage: "https://{name}.example.com/"
"#,
        )
        .unwrap();

        let mut declaration = named("hookless");
        let model = DeclarationModel::new(&declaration, &profile).unwrap();
        assert_eq!(
            model.homepage().unwrap().as_deref(),
            Some("https://github.com/example/hookless")
        );

        declaration.member = Some(true);
        let model = DeclarationModel::new(&declaration, &profile).unwrap();
        assert_eq!(
            model.homepage().unwrap().as_deref(),
            Some("https://hookless.example.com/")
        );
        assert_eq!(
            model.scm_url().unwrap().as_deref(),
            Some("https://github.com/example/hookless")
        );

        declaration.homepage = Some("https://custom.example.org/".to_string());
        declaration.jdk_version = Some(17);
        let model = DeclarationModel::new(&declaration, &profile).unwrap();
        assert_eq!(
            model.homepage().unwrap().as_deref(),
            Some("https://custom.example.org/")
        );
        assert_eq!(model.jdk_version(), Some(17));
    }

    #[test]
    fn test_base_dependencies_come_first() {
        let profile = Profile::parse(
            "p",
            r#"
ecosystem:
  dependencies: ["x.group:x:1", "y.group:y:1"]
"#,
        )
        .unwrap();
        let mut declaration = named("ordered");
        declaration.dependencies = vec![
            DependencySpec::entry("a.group:a:1"),
            DependencySpec::entry("b.group:b:1"),
        ];
        let model = DeclarationModel::new(&declaration, &profile).unwrap();
        let order: Vec<String> = model
            .dependencies()
            .unwrap()
            .iter()
            .map(|d| d.artifact.clone())
            .collect();
        assert_eq!(order, vec!["x", "y", "a", "b"]);
    }

    #[test]
    fn test_annotations_flag_adds_stagean_before_repository_entries() {
        let profile = empty_profile();
        let mut declaration = named("hookless");
        declaration.annotations = Some(true);
        declaration.dependencies = vec![DependencySpec::entry("guava")];
        let model = DeclarationModel::new(&declaration, &profile).unwrap();
        let artifacts: Vec<String> = model
            .dependencies()
            .unwrap()
            .iter()
            .map(|d| d.artifact.clone())
            .collect();
        assert_eq!(artifacts, vec!["stagean", "guava"]);
    }

    #[test]
    fn test_repeated_identical_dependency_is_collapsed() {
        let profile = empty_profile();
        let mut declaration = named("hookless");
        declaration.dependencies = vec![DependencySpec::entry("guava"), DependencySpec::entry("guava")];
        let model = DeclarationModel::new(&declaration, &profile).unwrap();
        let set = model.dependencies().unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().next().unwrap().scope, Scope::Main);
    }

    #[test]
    fn test_conflicting_dependency_versions_fail() {
        let profile = empty_profile();
        let mut declaration = named("hookless");
        declaration.dependencies = vec![
            DependencySpec::entry("com.google.guava:guava:30.1.1-jre"),
            DependencySpec::entry("com.google.guava:guava:31.0-jre"),
        ];
        let model = DeclarationModel::new(&declaration, &profile).unwrap();
        assert!(matches!(
            model.resolve(),
            Err(Error::VersionConflict { .. })
        ));
    }

    #[test]
    fn test_link_catalogs_expand_profile_placeholders_and_append_repository_links() {
        let profile = Profile::builtin().unwrap();
        let declaration = declaration::parse(
            "test",
            r#"
schema: 3
project: { name: hookless, jdk: 17, member: true }
javadoc_links:
  - https://noexception.machinezoo.com/javadocs/core/
documentation_links:
  - [Concepts, "https://hookless.machinezoo.com/concepts"]
"#,
        )
        .unwrap();
        let model = DeclarationModel::new(&declaration, &profile).unwrap();

        let javadoc = model.javadoc_links().unwrap();
        assert_eq!(javadoc.entries()[0].label, "Java SE 17");
        assert_eq!(
            javadoc.entries()[0].url,
            "https://docs.oracle.com/en/java/javase/17/docs/api/"
        );
        assert_eq!(javadoc.entries()[1].label, "noexception.machinezoo.com/javadocs/core");

        let documentation = model.documentation_links().unwrap();
        let labels: Vec<&str> = documentation
            .entries()
            .iter()
            .map(|e| e.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Homepage", "Concepts"]);
    }

    #[test]
    fn test_duplicate_link_label_fails() {
        let profile = empty_profile();
        let mut declaration = named("hookless");
        declaration.documentation_links = vec![
            LinkSpec::Pair("Concepts".to_string(), "https://example.com/1".to_string()),
            LinkSpec::Pair("Concepts".to_string(), "https://example.com/2".to_string()),
        ];
        let model = DeclarationModel::new(&declaration, &profile).unwrap();
        assert!(matches!(
            model.resolve(),
            Err(Error::DuplicateLink { .. })
        ));
    }

    #[test]
    fn test_unknown_profile_placeholder_is_render_error() {
        let profile = Profile::parse("p", "ecosystem:\n  group_id: \"com.example.{project}\"\n").unwrap();
        let declaration = named("hookless");
        let model = DeclarationModel::new(&declaration, &profile).unwrap();
        assert!(matches!(model.group_id(), Err(Error::Render { .. })));
    }

    #[test]
    fn test_oldest_schema_resolves_with_defaults() {
        let profile = Profile::builtin().unwrap();
        let declaration = declaration::parse("test", "name: hookless\njdk: 17\n").unwrap();
        let model = DeclarationModel::new(&declaration, &profile).unwrap();
        let resolution = model.resolve().unwrap();
        assert_eq!(resolution.descriptor.pretty_name, "hookless");
        assert!(!resolution.descriptor.member);
        assert!(resolution.descriptor.complete_javadoc);
        assert!(resolution.catalogs.documentation.is_empty());
    }
}
