//! Error types for tagnotes modules using thiserror.

use thiserror::Error;

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("No commits found in repository")]
    NoCommits,

    #[error("Failed to find reference '{0}': {1}")]
    ReferenceNotFound(String, #[source] git2::Error),

    #[error("Failed to parse commit: {0}")]
    ParseCommit(#[source] git2::Error),

    #[error("Failed to walk commit history: {0}")]
    RevwalkError(#[source] git2::Error),

    #[error("Failed to compute diff for commit {hash}: {source}")]
    DiffFailed {
        hash: String,
        #[source]
        source: git2::Error,
    },

    #[error("Commit {hash} has invalid timestamp (seconds={seconds})")]
    InvalidTimestamp { hash: String, seconds: i64 },
}

/// Errors from changelog operations.
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Failed to read changelog: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("Failed to write changelog: {0}")]
    WriteFailed(#[source] std::io::Error),

    #[error("Failed to create backup: {0}")]
    BackupFailed(#[source] std::io::Error),

    #[error("Release {0} already exists in changelog. Use --force to overwrite.")]
    VersionAlreadyExists(String),
}
