//! Maven project descriptor.

use crate::defaults;
use crate::error::{Error, Result};
use crate::markers;
use crate::model::Resolution;
use crate::registry::{Dependency, Scope};

use super::GENERATED_NOTICE;

const JAVADOC_PLUGIN_VERSION: &str = "3.2.0";

/// Manual region for hand-written build plugins.
pub const PLUGINS_REGION: &str = "plugins";

/// Escape text for XML element content.
pub(crate) fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn required<'a, T>(value: &'a Option<T>, attribute: &str) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| {
        Error::render(
            defaults::POM_PATH,
            format!("{} is not set by the declaration or the engine profile", attribute),
        )
    })
}

/// Parse the generated descriptor back, so malformed XML fails rendering
/// instead of reaching the repository.
fn well_formed(text: &str) -> Result<()> {
    let mut xot = xot::Xot::new();
    xot.parse(text).map_err(|e| {
        Error::render(
            defaults::POM_PATH,
            format!("generated XML is not well-formed: {}", e),
        )
    })?;
    Ok(())
}

/// Line writer that indents with tabs.
struct Xml {
    out: String,
}

impl Xml {
    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push('\t');
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn element(&mut self, depth: usize, name: &str, value: &str) {
        self.line(depth, &format!("<{0}>{1}</{0}>", name, xml_escape(value)));
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }
}

fn dependency(xml: &mut Xml, dependency: &Dependency) {
    xml.line(2, "<dependency>");
    xml.element(3, "groupId", &dependency.group);
    xml.element(3, "artifactId", &dependency.artifact);
    xml.element(3, "version", &dependency.version);
    if dependency.scope == Scope::Test {
        xml.element(3, "scope", "test");
    }
    xml.line(2, "</dependency>");
}

/// Render `pom.xml`.
pub fn render_pom(resolution: &Resolution) -> Result<String> {
    let descriptor = &resolution.descriptor;
    let group_id = required(&descriptor.group_id, "group_id")?;
    let version = required(&descriptor.version, "version")?;
    let jdk = required(&descriptor.jdk_version, "jdk_version")?;

    let mut xml = Xml { out: String::new() };
    xml.line(0, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.line(0, &format!("<!-- {} -->", GENERATED_NOTICE));
    xml.line(
        0,
        r#"<project xmlns="http://maven.apache.org/POM/4.0.0" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd">"#,
    );
    xml.element(1, "modelVersion", "4.0.0");
    xml.blank();

    xml.element(1, "groupId", group_id);
    xml.element(1, "artifactId", &descriptor.repository_name);
    xml.element(1, "version", version);
    xml.blank();

    xml.element(1, "name", &descriptor.pretty_name);
    xml.element(1, "description", &descriptor.description);
    if let Some(homepage) = &descriptor.homepage {
        xml.element(1, "url", homepage);
    }
    if let Some(year) = descriptor.inception_year {
        xml.element(1, "inceptionYear", &year.to_string());
    }

    if let Some(license) = &descriptor.license {
        xml.blank();
        xml.line(1, "<licenses>");
        xml.line(2, "<license>");
        xml.element(3, "name", &license.name);
        xml.element(3, "url", &license.url);
        xml.line(2, "</license>");
        xml.line(1, "</licenses>");
    }

    if let Some(scm) = &descriptor.scm_url {
        xml.blank();
        xml.line(1, "<scm>");
        xml.element(2, "connection", &format!("scm:git:{}", scm));
        xml.element(2, "developerConnection", &format!("scm:git:{}", scm));
        xml.element(2, "url", scm);
        xml.line(1, "</scm>");
    }

    xml.blank();
    xml.line(1, "<properties>");
    xml.element(2, "project.build.sourceEncoding", "UTF-8");
    xml.element(2, "maven.compiler.release", &jdk.to_string());
    xml.line(1, "</properties>");

    if !resolution.dependencies.is_empty() {
        xml.blank();
        xml.line(1, "<dependencies>");
        for scope in [Scope::Main, Scope::Test] {
            for entry in resolution.dependencies.in_scope(scope) {
                dependency(&mut xml, entry);
            }
        }
        xml.line(1, "</dependencies>");
    }

    xml.blank();
    xml.line(1, "<build>");
    xml.line(2, "<plugins>");
    xml.line(3, "<plugin>");
    xml.element(4, "groupId", "org.apache.maven.plugins");
    xml.element(4, "artifactId", "maven-javadoc-plugin");
    xml.element(4, "version", JAVADOC_PLUGIN_VERSION);
    xml.line(4, "<configuration>");
    if !descriptor.complete_javadoc {
        xml.element(5, "doclint", "none");
    }
    let links = resolution.catalogs.javadoc.entries();
    if !links.is_empty() {
        xml.line(5, "<links>");
        for link in links {
            xml.element(6, "link", &link.url);
        }
        xml.line(5, "</links>");
    }
    xml.line(4, "</configuration>");
    xml.line(3, "</plugin>");
    xml.line(3, &markers::begin_marker(PLUGINS_REGION));
    xml.line(3, &markers::end_marker(PLUGINS_REGION));
    xml.line(2, "</plugins>");
    xml.line(1, "</build>");
    xml.line(0, "</project>");

    well_formed(&xml.out)?;
    Ok(xml.out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::fixtures;

    #[test]
    fn test_xml_escape() {
        assert_eq!(xml_escape("a & <b> \"c\" 'd'"), "a &amp; &lt;b&gt; &quot;c&quot; &apos;d&apos;");
        assert_eq!(xml_escape("plain"), "plain");
    }

    #[test]
    fn test_pom_with_markup_in_text_is_well_formed() {
        let yaml = fixtures::HOOKLESS.replace(
            "description: Reactive programming library.",
            "description: \"Tom & Jerry's <reactive> \\\"library\\\"\"",
        );
        let pom = render_pom(&fixtures::resolve(&yaml)).unwrap();
        assert!(pom.contains(
            "\t<description>Tom &amp; Jerry&apos;s &lt;reactive&gt; &quot;library&quot;</description>\n"
        ));
        well_formed(&pom).unwrap();
    }

    #[test]
    fn test_malformed_xml_is_render_error() {
        let err = well_formed("<project><name>x</project>\n").unwrap_err();
        match err {
            Error::Render { artifact, message } => {
                assert_eq!(artifact, "pom.xml");
                assert!(message.contains("not well-formed"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_pom_identity() {
        let pom = render_pom(&fixtures::resolve(fixtures::HOOKLESS)).unwrap();
        assert!(pom.contains("\t<groupId>com.machinezoo.hookless</groupId>\n"));
        assert!(pom.contains("\t<artifactId>hookless</artifactId>\n"));
        assert!(pom.contains("\t<name>Hookless</name>\n"));
        assert!(pom.contains("\t<description>Reactive programming library.</description>\n"));
        assert!(pom.contains("\t<url>https://hookless.machinezoo.com/</url>\n"));
        assert!(pom.contains("\t<inceptionYear>2015</inceptionYear>\n"));
        assert!(pom.contains("<maven.compiler.release>17</maven.compiler.release>"));
        assert!(pom.contains("<connection>scm:git:https://github.com/machinezoo/hookless</connection>"));
    }

    #[test]
    fn test_pom_lists_main_dependencies_before_test_dependencies() {
        let pom = render_pom(&fixtures::resolve(fixtures::HOOKLESS)).unwrap();
        let guava = pom.find("<artifactId>guava</artifactId>").unwrap();
        let micrometer = pom.find("<artifactId>micrometer-core</artifactId>").unwrap();
        let junit = pom.find("<artifactId>junit-jupiter</artifactId>").unwrap();
        let awaitility = pom.find("<artifactId>awaitility</artifactId>").unwrap();
        assert!(guava < micrometer);
        assert!(micrometer < junit);
        assert!(junit < awaitility);
        assert_eq!(pom.matches("<scope>test</scope>").count(), 3);
    }

    #[test]
    fn test_pom_disables_doclint_unless_complete_javadoc() {
        let pom = render_pom(&fixtures::resolve(fixtures::HOOKLESS)).unwrap();
        assert!(pom.contains("<doclint>none</doclint>"));

        let complete = fixtures::HOOKLESS.replace("complete_javadoc: false", "complete_javadoc: true");
        let pom = render_pom(&fixtures::resolve(&complete)).unwrap();
        assert!(!pom.contains("<doclint>"));
    }

    #[test]
    fn test_pom_javadoc_links_follow_catalog_order() {
        let pom = render_pom(&fixtures::resolve(fixtures::HOOKLESS)).unwrap();
        let jdk = pom
            .find("<link>https://docs.oracle.com/en/java/javase/17/docs/api/</link>")
            .unwrap();
        let noexception = pom
            .find("<link>https://noexception.machinezoo.com/javadocs/core/</link>")
            .unwrap();
        assert!(jdk < noexception);
    }

    #[test]
    fn test_pom_contains_empty_plugins_region() {
        let pom = render_pom(&fixtures::resolve(fixtures::HOOKLESS)).unwrap();
        let regions = markers::parse_regions(std::path::Path::new("pom.xml"), &pom).unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].id, PLUGINS_REGION);
        assert!(regions[0].is_blank());
    }

    #[test]
    fn test_pom_requires_group_id() {
        use crate::model::DeclarationModel;
        use crate::profile::Profile;

        let declaration = crate::declaration::parse("test", "name: bare\njdk: 17\n").unwrap();
        let profile = Profile::default();
        let resolution = DeclarationModel::new(&declaration, &profile)
            .unwrap()
            .resolve()
            .unwrap();
        let err = render_pom(&resolution).unwrap_err();
        match err {
            Error::Render { artifact, message } => {
                assert_eq!(artifact, "pom.xml");
                assert!(message.contains("group_id"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
