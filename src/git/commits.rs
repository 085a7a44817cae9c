//! Commit records and the soft-failing commit fetcher.

use tracing::{debug, warn};

use crate::error::GitError;

/// Lines inserted and deleted by a single commit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub insertions: usize,
    pub deletions: usize,
}

/// Commit metadata as returned by a history query, before statistics are known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitHeader {
    pub hash: String,
    /// Subject line only.
    pub message: String,
    pub author: String,
    /// Author date in git's default log format.
    pub date: String,
    pub body: String,
}

/// A fetched commit with its diff statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub hash: String,
    pub message: String,
    pub author: String,
    pub date: String,
    pub body: String,
    pub insertions: usize,
    pub deletions: usize,
}

impl CommitRecord {
    pub fn new(header: CommitHeader, stats: DiffStats) -> Self {
        Self {
            hash: header.hash,
            message: header.message,
            author: header.author,
            date: header.date,
            body: header.body,
            insertions: stats.insertions,
            deletions: stats.deletions,
        }
    }
}

/// A resolved commit range: everything reachable from `to` but not from `from`.
///
/// `from == None` means the whole history up to `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionRange {
    pub from: Option<String>,
    pub to: String,
}

/// The version-control queries the fetcher needs.
///
/// This abstraction allows mocking the repository in tests.
#[cfg_attr(test, mockall::automock)]
pub trait CommitSource {
    /// Resolve a revision (tag, branch, hash) to a commit id.
    ///
    /// Returns `Ok(None)` when the revision does not exist.
    fn resolve(&self, revision: &str) -> Result<Option<String>, GitError>;

    /// List commits in the range, oldest first.
    fn list_commits(&self, range: &RevisionRange) -> Result<Vec<CommitHeader>, GitError>;

    /// Insertion and deletion counts for a single commit.
    fn commit_stats(&self, hash: &str) -> Result<DiffStats, GitError>;
}

/// Fetch commits between two revisions, oldest first.
///
/// `from == None` fetches everything up to `to`. Never fails: an unknown
/// revision or a failed history query yields an empty list and a warning, and
/// a failed statistics query counts that commit as 0/0.
pub fn fetch_commits<S>(source: &S, from: Option<&str>, to: &str) -> Vec<CommitRecord>
where
    S: CommitSource + ?Sized,
{
    let Some(to_id) = resolve_or_warn(source, to) else {
        return Vec::new();
    };

    let from_id = match from {
        Some(rev) => match resolve_or_warn(source, rev) {
            Some(id) => Some(id),
            None => return Vec::new(),
        },
        None => None,
    };

    let range = RevisionRange {
        from: from_id,
        to: to_id,
    };

    let headers = match source.list_commits(&range) {
        Ok(headers) => headers,
        Err(e) => {
            warn!(error = %e, "Failed to list commits; continuing with none");
            return Vec::new();
        }
    };

    debug!(count = headers.len(), "Listed commits in range");

    headers
        .into_iter()
        .map(|header| {
            let stats = source.commit_stats(&header.hash).unwrap_or_else(|e| {
                warn!(hash = %header.hash, error = %e, "Could not get commit stats");
                DiffStats::default()
            });
            CommitRecord::new(header, stats)
        })
        .collect()
}

fn resolve_or_warn<S>(source: &S, revision: &str) -> Option<String>
where
    S: CommitSource + ?Sized,
{
    match source.resolve(revision) {
        Ok(Some(id)) => Some(id),
        Ok(None) => {
            warn!(revision, "Could not find commit for revision");
            None
        }
        Err(e) => {
            warn!(revision, error = %e, "Failed to resolve revision");
            None
        }
    }
}
