//! Release range resolution.

use git2::Repository;

use crate::error::GitError;

use super::tags::previous_release_tag;

/// Revisions bounding the commits of a new release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRange {
    /// Previous release tag, or `None` for a first release.
    pub from: Option<String>,
    pub to: String,
}

impl ReleaseRange {
    /// Human-readable start of the range.
    pub fn from_ref(&self) -> &str {
        self.from.as_deref().unwrap_or("root")
    }
}

/// Resolve the range of commits that belong to `new_tag`.
///
/// Starts at the newest existing tag other than `new_tag` (or the start of
/// history) and ends at `to`, which defaults to HEAD.
pub fn resolve_release_range(
    repo: &Repository,
    new_tag: &str,
    to: Option<&str>,
) -> Result<ReleaseRange, GitError> {
    let from = previous_release_tag(repo, new_tag)?.map(|t| t.name);

    Ok(ReleaseRange {
        from,
        to: to.unwrap_or("HEAD").to_string(),
    })
}
