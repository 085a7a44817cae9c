//! `CommitSource` backed by a local git repository via git2.

use std::path::Path;

use chrono::{DateTime, FixedOffset, NaiveDate};
use git2::{Commit, DiffFindOptions, DiffOptions, ErrorCode, Oid, Repository, Sort};
use tracing::debug;

use crate::error::GitError;

use super::commits::{CommitHeader, CommitSource, DiffStats, RevisionRange};

/// git's default `%ad` format, e.g. `Mon Oct 19 12:00:00 2026 +0200`.
const GIT_DEFAULT_DATE_FORMAT: &str = "%a %b %-d %H:%M:%S %Y %z";

/// A git repository opened for changelog queries.
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Open the repository containing `path`, searching parent directories.
    pub fn discover(path: &Path) -> Result<Self, GitError> {
        let repo = Repository::discover(path).map_err(GitError::OpenRepository)?;
        Ok(Self { repo })
    }

    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    /// Fail with [`GitError::NoCommits`] when HEAD does not point at a commit.
    pub fn ensure_has_commits(&self) -> Result<(), GitError> {
        match self.repo.head() {
            Ok(head) => head
                .peel_to_commit()
                .map(|_| ())
                .map_err(GitError::ParseCommit),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                Err(GitError::NoCommits)
            }
            Err(e) => Err(GitError::ReferenceNotFound("HEAD".to_string(), e)),
        }
    }

    /// Committer date of the commit a revision points at, in that commit's own offset.
    pub fn commit_date(&self, revision: &str) -> Result<Option<NaiveDate>, GitError> {
        let Some(oid) = self.resolve_oid(revision)? else {
            return Ok(None);
        };
        let commit = self.repo.find_commit(oid).map_err(GitError::ParseCommit)?;
        Ok(git_time_to_datetime(commit.committer().when()).map(|dt| dt.date_naive()))
    }

    fn resolve_oid(&self, revision: &str) -> Result<Option<Oid>, GitError> {
        match self.repo.revparse_single(revision) {
            Ok(obj) => {
                let commit = obj.peel_to_commit().map_err(GitError::ParseCommit)?;
                Ok(Some(commit.id()))
            }
            Err(e) => {
                debug!(revision, error = %e, "Revision does not resolve");
                Ok(None)
            }
        }
    }

    fn parse_oid(&self, id: &str) -> Result<Oid, GitError> {
        Oid::from_str(id).map_err(|e| GitError::ReferenceNotFound(id.to_string(), e))
    }
}

impl CommitSource for GitRepository {
    fn resolve(&self, revision: &str) -> Result<Option<String>, GitError> {
        Ok(self.resolve_oid(revision)?.map(|oid| oid.to_string()))
    }

    fn list_commits(&self, range: &RevisionRange) -> Result<Vec<CommitHeader>, GitError> {
        let mut revwalk = self.repo.revwalk().map_err(GitError::RevwalkError)?;
        revwalk
            .set_sorting(Sort::TOPOLOGICAL | Sort::TIME | Sort::REVERSE)
            .map_err(GitError::RevwalkError)?;

        revwalk
            .push(self.parse_oid(&range.to)?)
            .map_err(GitError::RevwalkError)?;
        if let Some(from) = &range.from {
            revwalk
                .hide(self.parse_oid(from)?)
                .map_err(GitError::RevwalkError)?;
        }

        let mut headers = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result.map_err(GitError::RevwalkError)?;
            let commit = self.repo.find_commit(oid).map_err(GitError::ParseCommit)?;
            headers.push(header_from_commit(&commit)?);
        }

        Ok(headers)
    }

    fn commit_stats(&self, hash: &str) -> Result<DiffStats, GitError> {
        let oid = self.parse_oid(hash)?;
        let diff_err = |source: git2::Error| GitError::DiffFailed {
            hash: hash.to_string(),
            source,
        };

        let commit = self.repo.find_commit(oid).map_err(GitError::ParseCommit)?;
        let tree = commit.tree().map_err(diff_err)?;
        // Root commits diff against the empty tree.
        let parent_tree = match commit.parent(0) {
            Ok(parent) => Some(parent.tree().map_err(diff_err)?),
            Err(_) => None,
        };

        let mut opts = DiffOptions::new();
        let mut diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut opts))
            .map_err(diff_err)?;
        // Count renames the way `git show --shortstat` does.
        let mut find_opts = DiffFindOptions::new();
        find_opts.renames(true);
        diff.find_similar(Some(&mut find_opts)).map_err(diff_err)?;
        let stats = diff.stats().map_err(diff_err)?;

        Ok(DiffStats {
            insertions: stats.insertions(),
            deletions: stats.deletions(),
        })
    }
}

fn header_from_commit(commit: &Commit) -> Result<CommitHeader, GitError> {
    let hash = commit.id().to_string();
    let when = commit.author().when();
    let date = git_time_to_datetime(when)
        .map(|dt| dt.format(GIT_DEFAULT_DATE_FORMAT).to_string())
        .ok_or_else(|| GitError::InvalidTimestamp {
            hash: hash.clone(),
            seconds: when.seconds(),
        })?;

    Ok(CommitHeader {
        hash,
        message: lossy(commit.summary_bytes()),
        author: lossy(Some(commit.author().name_bytes())),
        date,
        body: lossy(commit.body_bytes()).trim_end().to_string(),
    })
}

/// Invalid UTF-8 becomes U+FFFD instead of dropping the whole field.
fn lossy(bytes: Option<&[u8]>) -> String {
    String::from_utf8_lossy(bytes.unwrap_or_default()).into_owned()
}

fn git_time_to_datetime(when: git2::Time) -> Option<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(when.offset_minutes() * 60)?;
    DateTime::from_timestamp(when.seconds(), 0).map(|utc| utc.with_timezone(&offset))
}
