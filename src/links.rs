//! # Link Catalogs
//!
//! Ordered, label-unique collections of cross-reference links. Two catalogs
//! exist per run: javadoc cross-references (rendered into the javadoc plugin
//! configuration and the javadoc links index) and documentation
//! cross-references (rendered into the documentation links index).
//!
//! Insertion order is preserved. Base entries from the engine profile are
//! pushed first and repository entries are appended after them. A second
//! entry with an existing label is rejected with [`Error::DuplicateLink`],
//! because an ambiguous label would produce ambiguous hyperlink text.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Which catalog a link belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    Javadoc,
    Documentation,
}

impl LinkKind {
    /// Attribute name used in declarations and error messages.
    pub fn attribute(&self) -> &'static str {
        match self {
            LinkKind::Javadoc => "javadoc_links",
            LinkKind::Documentation => "documentation_links",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkKind::Javadoc => f.write_str("javadoc"),
            LinkKind::Documentation => f.write_str("documentation"),
        }
    }
}

/// A labeled link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    pub label: String,
    pub url: String,
}

/// A link as written in a declaration or profile.
///
/// Accepts a bare URL, a `[label, url]` pair or a `{label, url}` mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkSpec {
    Url(String),
    Pair(String, String),
    Labeled { label: String, url: String },
}

impl LinkSpec {
    /// Convert into a validated entry, passing label and URL through
    /// `expand` first.
    pub fn to_entry<F>(&self, kind: LinkKind, expand: F) -> Result<LinkEntry>
    where
        F: Fn(&str) -> Result<String>,
    {
        let (label, url) = match self {
            LinkSpec::Url(url) => (None, expand(url)?),
            LinkSpec::Pair(label, url) | LinkSpec::Labeled { label, url } => {
                (Some(expand(label)?), expand(url)?)
            }
        };
        if let Some(text) = label.iter().chain([&url]).find(|t| has_line_break(t)) {
            return Err(Error::Configuration {
                subject: kind.attribute().to_string(),
                message: format!("line break in link {:?}", text),
                hint: Some("Labels and URLs must fit on one line".to_string()),
            });
        }
        let parsed = Url::parse(url.trim()).map_err(|e| Error::Configuration {
            subject: kind.attribute().to_string(),
            message: format!("invalid URL '{}': {}", url, e),
            hint: Some("Links must be absolute URLs such as https://example.com/docs/".to_string()),
        })?;
        let label = match label {
            Some(label) if !label.trim().is_empty() => label.trim().to_string(),
            Some(_) => {
                return Err(Error::configuration(
                    kind.attribute(),
                    format!("empty label for {}", url),
                ))
            }
            None => derive_label(&parsed),
        };
        Ok(LinkEntry {
            label,
            url: url.trim().to_string(),
        })
    }
}

/// Whether `text` spans more than one line.
pub(crate) fn has_line_break(text: &str) -> bool {
    text.contains(['\n', '\r'])
}

/// Label for an unlabeled link: host and path without the trailing slash.
fn derive_label(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    let path = url.path().trim_end_matches('/');
    format!("{}{}", host, path)
}

/// An ordered collection of links with unique labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCatalog {
    kind: LinkKind,
    entries: Vec<LinkEntry>,
}

impl LinkCatalog {
    pub fn new(kind: LinkKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    pub fn kind(&self) -> LinkKind {
        self.kind
    }

    /// Append an entry, rejecting a label that is already present.
    pub fn push(&mut self, entry: LinkEntry) -> Result<()> {
        if self.entries.iter().any(|e| e.label == entry.label) {
            return Err(Error::DuplicateLink {
                kind: self.kind,
                label: entry.label,
            });
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn entries(&self) -> &[LinkEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Both catalogs of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalogs {
    pub javadoc: LinkCatalog,
    pub documentation: LinkCatalog,
}

impl Catalogs {
    pub fn new() -> Self {
        Self {
            javadoc: LinkCatalog::new(LinkKind::Javadoc),
            documentation: LinkCatalog::new(LinkKind::Documentation),
        }
    }

    /// The ordered links of one kind.
    pub fn links(&self, kind: LinkKind) -> &[LinkEntry] {
        self.catalog(kind).entries()
    }

    pub fn catalog(&self, kind: LinkKind) -> &LinkCatalog {
        match kind {
            LinkKind::Javadoc => &self.javadoc,
            LinkKind::Documentation => &self.documentation,
        }
    }

    pub fn catalog_mut(&mut self, kind: LinkKind) -> &mut LinkCatalog {
        match kind {
            LinkKind::Javadoc => &mut self.javadoc,
            LinkKind::Documentation => &mut self.documentation,
        }
    }
}

impl Default for Catalogs {
    fn default() -> Self {
        Self::new()
    }
}
