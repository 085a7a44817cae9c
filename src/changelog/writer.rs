//! Read, update and atomically write the changelog file.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::ChangelogError;

use super::document::ChangelogDocument;

/// Options controlling how a release is written.
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Replace an existing section for the same tag instead of failing.
    pub force: bool,
    /// Project name used in the header of a newly created changelog.
    pub project_name: Option<String>,
}

/// What [`update_changelog`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    pub created: bool,
    pub replaced_existing: bool,
    pub backup_path: Option<PathBuf>,
}

/// Read the changelog at `path`, or the default skeleton if it does not exist.
///
/// The flag is `true` when the file existed.
pub fn read_or_default(
    path: &Path,
    project_name: Option<&str>,
) -> Result<(ChangelogDocument, bool), ChangelogError> {
    if !path.exists() {
        debug!(path = %path.display(), "Changelog not found; using default skeleton");
        return Ok((ChangelogDocument::default_skeleton(project_name), false));
    }

    let content = std::fs::read_to_string(path).map_err(ChangelogError::ReadFailed)?;
    Ok((ChangelogDocument::parse(&content), true))
}

/// Splice a rendered release `section` for `tag` into the changelog at `path`.
///
/// - Creates the file from the default skeleton if it doesn't exist
/// - Backs up an existing file to `<filename>.md.bak` (e.g., `CHANGELOG.md.bak`)
/// - Refuses to add a second section for `tag` unless `options.force` is set
pub fn update_changelog(
    path: &Path,
    section: &str,
    tag: &str,
    options: &WriteOptions,
) -> Result<WriteSummary, ChangelogError> {
    let (mut document, existed) = read_or_default(path, options.project_name.as_deref())?;

    let replaced_existing = document.contains_release(tag);
    if replaced_existing {
        if !options.force {
            return Err(ChangelogError::VersionAlreadyExists(tag.to_string()));
        }
        info!(tag, "Replacing existing release section");
        document.replace_release(tag, section);
    } else {
        document.insert_release(section);
    }

    let backup_path = if existed {
        let backup_path = path.with_extension("md.bak");
        std::fs::copy(path, &backup_path).map_err(ChangelogError::BackupFailed)?;
        Some(backup_path)
    } else {
        None
    };

    write_atomic(path, &document.to_string())?;

    Ok(WriteSummary {
        created: !existed,
        replaced_existing,
        backup_path,
    })
}

/// Write through a temp file in the target directory, then rename over `path`.
fn write_atomic(path: &Path, content: &str) -> Result<(), ChangelogError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(ChangelogError::WriteFailed)?;
    file.write_all(content.as_bytes())
        .map_err(ChangelogError::WriteFailed)?;
    file.persist(path)
        .map_err(|e| ChangelogError::WriteFailed(e.error))?;

    Ok(())
}
