//! Run configuration resolved from CLI arguments and environment.

use std::env;
use std::path::PathBuf;

/// Default changelog file, relative to the working directory.
pub const DEFAULT_CHANGELOG_PATH: &str = "CHANGELOG.md";

/// Environment variable overriding the changelog path when `--output` is not given.
pub const CHANGELOG_ENV_VAR: &str = "TAGNOTES_CHANGELOG";

/// Environment variable supplying the project name for a new changelog header.
pub const PROJECT_ENV_VAR: &str = "TAGNOTES_PROJECT";

/// Everything a single run needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Tag of the release being written.
    pub tag: String,
    /// End of the commit range.
    pub to: String,
    pub changelog_path: PathBuf,
    pub project_name: Option<String>,
    pub dry_run: bool,
    pub force: bool,
}

/// Explicit path, else `TAGNOTES_CHANGELOG`, else `CHANGELOG.md`.
pub fn resolve_changelog_path(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }

    match env::var(CHANGELOG_ENV_VAR) {
        Ok(v) if !v.trim().is_empty() => PathBuf::from(v),
        _ => PathBuf::from(DEFAULT_CHANGELOG_PATH),
    }
}

/// Explicit name, else `TAGNOTES_PROJECT`, else none.
pub fn resolve_project_name(explicit: Option<String>) -> Option<String> {
    explicit
        .or_else(|| env::var(PROJECT_ENV_VAR).ok())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
}
