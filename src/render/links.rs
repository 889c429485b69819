//! Markdown link indexes.

use crate::links::LinkEntry;
use crate::markers;
use crate::model::Resolution;

use super::GENERATED_NOTICE;

/// Manual region for hand-written notes below the documentation links.
pub const NOTES_REGION: &str = "notes";

/// Escape text placed inside `[...]` of a Markdown link.
fn link_text(label: &str) -> String {
    let mut escaped = String::with_capacity(label.len());
    for c in label.chars() {
        if matches!(c, '\\' | '[' | ']') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn index(title: &str, entries: &[LinkEntry]) -> String {
    let mut out = format!("<!-- {} -->\n\n# {}\n\n", GENERATED_NOTICE, title);
    if entries.is_empty() {
        out.push_str("No links.\n");
    }
    for entry in entries {
        out.push_str(&format!("- [{}]({})\n", link_text(&entry.label), entry.url));
    }
    out
}

/// Render `docs/javadoc-links.md`.
pub fn render_javadoc_links(resolution: &Resolution) -> String {
    index(
        &format!("{} javadoc links", resolution.descriptor.pretty_name),
        resolution.catalogs.javadoc.entries(),
    )
}

/// Render `docs/documentation-links.md`.
pub fn render_documentation_links(resolution: &Resolution) -> String {
    let mut out = index(
        &format!("{} documentation", resolution.descriptor.pretty_name),
        resolution.catalogs.documentation.entries(),
    );
    out.push('\n');
    out.push_str(&markers::begin_marker(NOTES_REGION));
    out.push('\n');
    out.push_str(&markers::end_marker(NOTES_REGION));
    out.push('\n');
    out
}
