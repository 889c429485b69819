//! # File Reconciler
//!
//! Brings one rendered artifact onto disk in two steps:
//!
//! 1.  **Plan**: read the existing file (if any), carry its manual regions
//!     into the rendering and compare. Nothing is written; a region that
//!     would be lost fails here.
//! 2.  **Commit**: write the merged content to a temporary file in the
//!     target directory, sync it, give it the permissions of the file it
//!     replaces and rename it over the target.
//!
//! Keeping the steps apart lets a run plan every artifact before touching
//! any of them, so a failure in one artifact leaves all of them untouched.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::markers;
use crate::render::RenderedArtifact;

/// Mode for files the reconciler creates.
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// What committing a plan will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Unchanged,
    Create,
    Update,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Unchanged => f.write_str("unchanged"),
            Outcome::Create => f.write_str("created"),
            Outcome::Update => f.write_str("updated"),
        }
    }
}

/// A reconciliation decided but not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// Path relative to the repository root.
    pub relative: PathBuf,
    /// Absolute target path.
    pub target: PathBuf,
    pub outcome: Outcome,
    content: Vec<u8>,
}

fn io_error(path: &Path, action: &str, e: io::Error) -> Error {
    Error::Io(io::Error::new(
        e.kind(),
        format!("failed to {} '{}': {}", action, path.display(), e),
    ))
}

/// Decide how `artifact` lands under `root`.
pub fn plan(root: &Path, artifact: &RenderedArtifact) -> Result<Plan> {
    let target = root.join(&artifact.path);
    let existing = match fs::read(&target) {
        Ok(bytes) => Some(bytes),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(io_error(&target, "read", e)),
    };

    let (outcome, content) = match existing {
        None => {
            markers::parse_regions(&artifact.path, &String::from_utf8_lossy(&artifact.content))?;
            (Outcome::Create, artifact.content.clone())
        }
        Some(existing) => {
            let existing = String::from_utf8(existing).map_err(|_| Error::MergeConflict {
                path: artifact.path.clone(),
                message: "existing file is not valid UTF-8".to_string(),
            })?;
            let rendered = String::from_utf8_lossy(&artifact.content);
            let merged = markers::merge_regions(&artifact.path, &existing, &rendered)?;
            if merged == existing {
                (Outcome::Unchanged, merged.into_bytes())
            } else {
                (Outcome::Update, merged.into_bytes())
            }
        }
    };
    debug!("Planned {} as {}", artifact.path.display(), outcome);

    Ok(Plan {
        relative: artifact.path.clone(),
        target,
        outcome,
        content,
    })
}

impl Plan {
    /// Content the target holds after commit.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Whether committing would modify the file system.
    pub fn is_change(&self) -> bool {
        self.outcome != Outcome::Unchanged
    }

    /// Write the planned content. Unchanged plans are a no-op.
    pub fn commit(&self) -> Result<()> {
        if !self.is_change() {
            return Ok(());
        }
        write_atomic(&self.target, &self.content)?;
        debug!("Wrote {}", self.target.display());
        Ok(())
    }
}

/// Replace `path` with `content` through a synced temporary file.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| io_error(parent, "create directory", e))?;

    let permissions = match fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(io_error(path, "inspect", e)),
    };

    let mut temp =
        NamedTempFile::new_in(parent).map_err(|e| io_error(parent, "create temporary file in", e))?;
    temp.write_all(content)
        .map_err(|e| io_error(temp.path(), "write", e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| io_error(temp.path(), "sync", e))?;

    match permissions {
        Some(permissions) => fs::set_permissions(temp.path(), permissions)
            .map_err(|e| io_error(temp.path(), "set permissions on", e))?,
        None => set_new_file_permissions(temp.path())?,
    }

    temp.persist(path)
        .map_err(|e| io_error(path, "replace", e.error))?;
    Ok(())
}

#[cfg(unix)]
fn set_new_file_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(NEW_FILE_MODE))
        .map_err(|e| io_error(path, "set permissions on", e))
}

#[cfg(not(unix))]
fn set_new_file_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
