//! Gathering everything needed for one release section.

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::changelog::ReleaseSection;
use crate::git::{
    CommitRecord, GitRepository, ReleaseRange, fetch_commits, resolve_release_range,
};

/// Commits and metadata for the release being written.
#[derive(Debug, Clone)]
pub struct PreparedRelease {
    pub tag: String,
    pub range: ReleaseRange,
    pub date: NaiveDate,
    /// Oldest first.
    pub commits: Vec<CommitRecord>,
}

impl PreparedRelease {
    pub fn section(&self) -> ReleaseSection<'_> {
        ReleaseSection::new(&self.tag, self.date, &self.commits)
    }

    pub fn render(&self) -> String {
        self.section().render()
    }
}

/// Collect the commits for `tag` since the previous release tag, up to `to`.
///
/// Never fails: an unreadable tag list is treated as a first release, and a
/// tag that does not resolve yet is dated today.
pub fn prepare_release(repo: &GitRepository, tag: &str, to: &str) -> PreparedRelease {
    let range = match resolve_release_range(repo.repository(), tag, Some(to)) {
        Ok(range) => range,
        Err(e) => {
            warn!(error = %e, "Could not list tags; treating as first release");
            ReleaseRange {
                from: None,
                to: to.to_string(),
            }
        }
    };

    let commits = fetch_commits(repo, range.from.as_deref(), &range.to);
    info!(
        count = commits.len(),
        from = range.from_ref(),
        to = %range.to,
        "Collected commits for release"
    );

    let date = release_date(repo, tag);

    PreparedRelease {
        tag: tag.to_string(),
        range,
        date,
        commits,
    }
}

/// Date of the tagged commit, or today when the tag does not exist yet.
pub fn release_date(repo: &GitRepository, tag: &str) -> NaiveDate {
    match repo.commit_date(tag) {
        Ok(Some(date)) => date,
        Ok(None) => Local::now().date_naive(),
        Err(e) => {
            warn!(tag, error = %e, "Could not read tag date; using today");
            Local::now().date_naive()
        }
    }
}
