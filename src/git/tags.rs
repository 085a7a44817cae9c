//! Tag enumeration and release ordering.

use std::cmp::Ordering;

use git2::Repository;
use semver::Version;
use tracing::{debug, warn};

use crate::error::GitError;

/// A git tag with optional semver version.
#[derive(Debug, Clone)]
pub struct TagInfo {
    pub name: String,
    pub oid: git2::Oid,
    pub version: Option<Version>,
}

/// Get all tags from the repository.
pub fn get_all_tags(repo: &Repository) -> Result<Vec<TagInfo>, GitError> {
    let mut tags = Vec::new();

    repo.tag_foreach(|oid, name_bytes| {
        if let Ok(name_str) = std::str::from_utf8(name_bytes) {
            let name = name_str
                .strip_prefix("refs/tags/")
                .unwrap_or(name_str)
                .to_string();

            let version = get_version_from_tag(&name);

            // Annotated tags point at a tag object; peel to the commit.
            let resolved_oid = match repo.find_tag(oid) {
                Ok(tag_obj) => tag_obj.target_id(),
                Err(_) => oid,
            };

            tags.push(TagInfo {
                name,
                oid: resolved_oid,
                version,
            });
        } else {
            warn!("Skipping tag with OID {} - name is not valid UTF-8", oid);
        }
        true
    })
    .map_err(GitError::RevwalkError)?;

    Ok(tags)
}

/// Extract semver version from a tag name.
/// Handles both "v1.2.3" and "1.2.3" formats.
pub fn get_version_from_tag(tag_name: &str) -> Option<Version> {
    let version_str = tag_name.strip_prefix('v').unwrap_or(tag_name);
    Version::parse(version_str).ok()
}

/// Order tags newest release first.
///
/// Semver tags come first, highest version first; the rest follow by name,
/// descending.
pub fn sort_newest_first(tags: &mut [TagInfo]) {
    tags.sort_by(|a, b| match (&a.version, &b.version) {
        (Some(va), Some(vb)) => vb.cmp(va).then_with(|| b.name.cmp(&a.name)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.name.cmp(&a.name),
    });
}

/// The most recent release tag other than `new_tag`, if any.
///
/// `new_tag` is skipped so the tag being released can already exist.
pub fn previous_release_tag(repo: &Repository, new_tag: &str) -> Result<Option<TagInfo>, GitError> {
    let mut tags = get_all_tags(repo)?;
    tags.retain(|t| t.name != new_tag);
    sort_newest_first(&mut tags);

    let previous = tags.into_iter().next();
    match &previous {
        Some(tag) => debug!(tag = %tag.name, "Found previous release tag"),
        None => debug!("No previous release tag found"),
    }

    Ok(previous)
}
