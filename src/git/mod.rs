//! Git operations using git2-rs.

pub mod commits;
pub mod range;
pub mod repository;
pub mod tags;

pub use commits::{
    CommitHeader, CommitRecord, CommitSource, DiffStats, RevisionRange, fetch_commits,
};
pub use range::{ReleaseRange, resolve_release_range};
pub use repository::GitRepository;
pub use tags::{TagInfo, get_version_from_tag, previous_release_tag};
