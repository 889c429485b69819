//! # Artifact Synthesizer
//!
//! Pure functions from a [`Resolution`] to the bytes of every generated
//! artifact. Rendering never touches the file system and is deterministic:
//! the same resolution always produces byte-identical output, with `\n`
//! line endings, a trailing newline and no timestamps.

mod links;
mod pom;

use std::path::PathBuf;

use crate::defaults;
use crate::error::Result;
use crate::model::Resolution;

pub use links::{render_documentation_links, render_javadoc_links};
pub use pom::render_pom;

/// Header line placed at the top of every artifact.
pub const GENERATED_NOTICE: &str =
    "Generated by repo-scaffold from .scaffold.yaml. Edit only inside manual regions.";

/// Rendered content for one relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    /// Path relative to the repository root.
    pub path: PathBuf,
    pub content: Vec<u8>,
}

impl RenderedArtifact {
    fn new(path: &str, content: String) -> Self {
        Self {
            path: PathBuf::from(path),
            content: content.into_bytes(),
        }
    }
}

/// Render every artifact, in a fixed order.
pub fn render(resolution: &Resolution) -> Result<Vec<RenderedArtifact>> {
    Ok(vec![
        RenderedArtifact::new(defaults::POM_PATH, render_pom(resolution)?),
        RenderedArtifact::new(
            defaults::JAVADOC_LINKS_PATH,
            render_javadoc_links(resolution),
        ),
        RenderedArtifact::new(
            defaults::DOCUMENTATION_LINKS_PATH,
            render_documentation_links(resolution),
        ),
    ])
}
