//! Manual region parsing and merging.
//!
//! Generated artifacts may contain regions that belong to the repository's
//! maintainers rather than to the generator:
//! ```text
//! <!-- scaffold:manual:begin plugins -->
//! hand-written content
//! <!-- scaffold:manual:end plugins -->
//! ```
//!
//! Each marker must be alone on its line apart from indentation. Regions do
//! not nest and IDs are unique within a file.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

/// Matches a begin or end marker line.
static MARKER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*<!-- scaffold:manual:(begin|end) ([A-Za-z0-9_-]+) -->\s*$")
        .expect("Invalid manual marker regex")
});

/// Begin marker for region `id`.
pub fn begin_marker(id: &str) -> String {
    format!("<!-- scaffold:manual:begin {} -->", id)
}

/// End marker for region `id`.
pub fn end_marker(id: &str) -> String {
    format!("<!-- scaffold:manual:end {} -->", id)
}

/// A manual region found in a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub id: String,
    /// Lines between the markers, each with its line terminator.
    pub body: String,
    /// 0-based index of the begin marker line.
    pub begin_line: usize,
    /// 0-based index of the end marker line.
    pub end_line: usize,
}

impl Region {
    pub fn is_blank(&self) -> bool {
        self.body.trim().is_empty()
    }
}

fn conflict(path: &Path, message: String) -> Error {
    Error::MergeConflict {
        path: path.to_path_buf(),
        message,
    }
}

/// Parse every manual region in `text`, in order of appearance.
///
/// `path` only names the file in errors.
pub fn parse_regions(path: &Path, text: &str) -> Result<Vec<Region>> {
    let mut regions = Vec::new();
    let mut seen = BTreeSet::new();
    let mut open: Option<(String, usize, String)> = None;

    for (index, line) in text.split_inclusive('\n').enumerate() {
        let bare = line.trim_end_matches(['\n', '\r']);
        let Some(caps) = MARKER_REGEX.captures(bare) else {
            if let Some((_, _, body)) = open.as_mut() {
                body.push_str(line);
            }
            continue;
        };
        let id = caps[2].to_string();
        match (&caps[1], open.take()) {
            ("begin", None) => {
                if !seen.insert(id.clone()) {
                    return Err(conflict(
                        path,
                        format!("manual region '{}' appears more than once", id),
                    ));
                }
                open = Some((id, index, String::new()));
            }
            ("begin", Some((outer, _, _))) => {
                return Err(conflict(
                    path,
                    format!(
                        "manual region '{}' begins inside region '{}' (line {})",
                        id,
                        outer,
                        index + 1
                    ),
                ));
            }
            (_, Some((open_id, begin_line, body))) if open_id == id => {
                regions.push(Region {
                    id,
                    body,
                    begin_line,
                    end_line: index,
                });
            }
            (_, _) => {
                return Err(conflict(
                    path,
                    format!(
                        "end marker for manual region '{}' without a matching begin (line {})",
                        id,
                        index + 1
                    ),
                ));
            }
        }
    }

    if let Some((id, begin_line, _)) = open {
        return Err(conflict(
            path,
            format!(
                "manual region '{}' starting at line {} is never closed",
                id,
                begin_line + 1
            ),
        ));
    }
    Ok(regions)
}

/// Carry the manual regions of `existing` into `rendered`.
///
/// Regions present in both take their body from `existing`. A non-blank
/// region of `existing` that `rendered` no longer has is a conflict, since
/// writing the rendering would lose it.
pub fn merge_regions(path: &Path, existing: &str, rendered: &str) -> Result<String> {
    let kept = parse_regions(path, existing)?;
    let fresh = parse_regions(path, rendered)?;

    if let Some(lost) = kept
        .iter()
        .find(|region| !region.is_blank() && !fresh.iter().any(|f| f.id == region.id))
    {
        return Err(conflict(
            path,
            format!(
                "manual region '{}' has content but is no longer generated",
                lost.id
            ),
        ));
    }

    let mut merged = String::with_capacity(rendered.len() + existing.len());
    let mut skip_until: Option<usize> = None;
    for (index, line) in rendered.split_inclusive('\n').enumerate() {
        if let Some(end_line) = skip_until {
            if index < end_line {
                continue;
            }
            skip_until = None;
        }
        merged.push_str(line);
        let replacement = fresh
            .iter()
            .find(|f| f.begin_line == index)
            .and_then(|f| kept.iter().find(|k| k.id == f.id).map(|k| (f, k)));
        if let Some((fresh_region, kept_region)) = replacement {
            merged.push_str(&kept_region.body);
            skip_until = Some(fresh_region.end_line);
        }
    }
    Ok(merged)
}
