//! tagnotes - turn git history since the last tag into a CHANGELOG.md release section.
//!
//! # Overview
//!
//! tagnotes lists the commits since the previous release tag, files each one
//! under a category with a keyword heuristic, and splices a markdown section
//! for the new tag into CHANGELOG.md below the `[Unreleased]` section.

pub mod changelog;
pub mod config;
pub mod error;
pub mod git;
pub mod release;

// Re-export commonly used types
pub use changelog::{Category, ChangelogDocument, ReleaseSection, classify, format_entry};
pub use config::Config;
pub use error::{ChangelogError, GitError};
pub use git::{CommitRecord, CommitSource, GitRepository};
pub use release::{PreparedRelease, prepare_release};
