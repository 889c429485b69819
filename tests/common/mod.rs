//! Shared test utilities for integration and E2E tests.
//!
//! Add `mod common;` to a test file, then `use common::prelude::*;`.
//!
//! ```rust,ignore
//! let fixture = TestFixture::new().with_declaration(declarations::HOOKLESS);
//! fixture.command().arg("generate").assert().success();
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::declarations;
    pub use super::TestFixture;
}

/// Declaration snippets shared by the tests.
#[allow(dead_code)]
pub mod declarations {
    /// Smallest usable declaration.
    pub const MINIMAL: &str = "schema: 3\nproject:\n  name: minimal\n";

    /// A member library declared in the current schema.
    pub const HOOKLESS: &str = r#"schema: 3
project:
  name: hookless
  member: true
  pretty_name: Hookless
  description: Reactive programming library.
  inception_year: 2015
  jdk: 17
  annotations: true
  complete_javadoc: false
dependencies:
  - noexception
  - noexception-slf4j
  - fastutil
  - guava
  - io.micrometer:micrometer-core:1.6.4
  - io.opentracing:opentracing-util:0.33.0
  - junit
  - hamcrest
  - ["org.awaitility:awaitility:4.0.3", test]
  - "org.junit-pioneer:junit-pioneer:0.9.0"
  - slf4j-test
javadoc_links:
  - https://noexception.machinezoo.com/javadocs/core/
documentation_links:
  - [Concepts, "https://hookless.machinezoo.com/concepts"]
  - [Adapters, "https://hookless.machinezoo.com/adapters"]
"#;

    /// The same kind of repository in the oldest schema.
    pub const LEGACY: &str = r#"name: legacy
description: Written before schemas had numbers.
year: 2019
jdk: 11
dependencies:
  - guava
  - [junit, test]
javadoc_links:
  - https://guava.dev/releases/30.1.1-jre/api/docs/
"#;

    /// Declaration without a repository name.
    pub const NAMELESS: &str = "schema: 3\nproject:\n  jdk: 17\n";

    /// Declaration requesting one coordinate at two versions.
    pub const CONFLICTING: &str = r#"schema: 3
project: { name: conflicting }
dependencies:
  - com.google.guava:guava:30.1.1-jre
  - com.google.guava:guava:31.0-jre
"#;

    /// Declaration with an unknown dependency symbol.
    pub const UNKNOWN_SYMBOL: &str = r#"schema: 3
project: { name: typo }
dependencies:
  - guvaa
"#;
}

/// A temporary repository checkout with an optional declaration.
///
/// The repository lives one level below the temporary directory so that a
/// sibling engine directory can be placed next to it.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    pub const REPOSITORY: &'static str = "repository";

    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child(Self::REPOSITORY)
            .create_dir_all()
            .expect("Failed to create repository directory");
        Self { temp_dir }
    }

    /// Write `.scaffold.yaml` with the given content.
    pub fn with_declaration(self, content: &str) -> Self {
        self.child(".scaffold.yaml")
            .write_str(content)
            .expect("Failed to write declaration");
        self
    }

    /// Write a file relative to the repository root.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Write an engine profile next to the repository checkout.
    #[allow(dead_code)]
    pub fn with_sibling_profile(self, content: &str) -> Self {
        self.temp_dir
            .child("repo-scaffold/profile.yaml")
            .write_str(content)
            .expect("Failed to write sibling profile");
        self
    }

    /// Repository root.
    pub fn path(&self) -> PathBuf {
        self.temp_dir.path().join(Self::REPOSITORY)
    }

    /// A path relative to the repository root.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(Path::new(Self::REPOSITORY).join(path))
    }

    /// The temporary directory that contains the repository.
    pub fn workspace(&self) -> &Path {
        self.temp_dir.path()
    }

    #[allow(dead_code)]
    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.path().join(path)).expect("Failed to read file")
    }

    /// A command running in the repository root, isolated from the caller's
    /// environment.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("repo-scaffold");
        cmd.current_dir(self.path());
        self.isolate(&mut cmd);
        cmd
    }

    /// Strip the caller's scaffold variables and point the user config
    /// directory into the fixture, so a registered profile on the host is
    /// never picked up.
    pub fn isolate(&self, cmd: &mut assert_cmd::Command) {
        cmd.env_remove("SCAFFOLD_DECLARATION")
            .env_remove("SCAFFOLD_PROFILE")
            .env_remove("RUST_LOG")
            .env("XDG_CONFIG_HOME", self.config_home())
            .env("HOME", self.workspace())
            .env("NO_COLOR", "1");
    }

    /// User config directory seen by commands from [`TestFixture::command`].
    pub fn config_home(&self) -> PathBuf {
        self.temp_dir.path().join(".config")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_repository_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().is_dir());
    }

    #[test]
    fn test_fixture_with_declaration() {
        let fixture = TestFixture::new().with_declaration(declarations::MINIMAL);
        assert!(fixture.path().join(".scaffold.yaml").is_file());
    }

    #[test]
    fn test_config_home_is_inside_fixture() {
        let fixture = TestFixture::new();
        assert!(fixture.config_home().starts_with(fixture.workspace()));
        assert!(!fixture.config_home().starts_with(fixture.path()));
    }

    #[test]
    fn test_declarations_are_valid_yaml() {
        for declaration in [
            declarations::MINIMAL,
            declarations::HOOKLESS,
            declarations::LEGACY,
            declarations::NAMELESS,
            declarations::CONFLICTING,
            declarations::UNKNOWN_SYMBOL,
        ] {
            serde_yaml::from_str::<serde_yaml::Value>(declaration).unwrap();
        }
    }
}
