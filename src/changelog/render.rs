//! Release section rendering.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::git::CommitRecord;

use super::category::Category;
use super::classify::classify;
use super::format::format_entry;

/// Headings used for a release without commits.
pub(crate) const PLACEHOLDER_HEADINGS: [Category; 3] =
    [Category::Feature, Category::Chore, Category::Fix];

/// Classified commits for one release.
#[derive(Debug, Clone)]
pub struct ReleaseSection<'a> {
    pub tag: String,
    pub date: NaiveDate,
    /// Keyed by category, so iteration follows [`Category::ALL`].
    pub groups: BTreeMap<Category, Vec<&'a CommitRecord>>,
}

impl<'a> ReleaseSection<'a> {
    /// Classify `records` (oldest first) into a section.
    pub fn new(tag: &str, date: NaiveDate, records: &'a [CommitRecord]) -> Self {
        let mut groups: BTreeMap<Category, Vec<&CommitRecord>> = BTreeMap::new();
        for record in records {
            groups
                .entry(classify(&record.message))
                .or_default()
                .push(record);
        }

        Self {
            tag: tag.to_string(),
            date,
            groups,
        }
    }

    pub fn total_commits(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Per-category counts in display order, for summary output.
    pub fn count_by_category(&self) -> Vec<(Category, usize)> {
        self.groups
            .iter()
            .map(|(category, records)| (*category, records.len()))
            .collect()
    }

    /// Render as a markdown fragment ending in a `---` separator.
    pub fn render(&self) -> String {
        let mut section = format!("## [{}] - {}\n\n", self.tag, self.date.format("%Y-%m-%d"));

        if self.groups.is_empty() {
            for category in PLACEHOLDER_HEADINGS {
                section.push_str(&format!("### {}\n- N/A\n\n", category.heading()));
            }
            section.push_str("---\n\n");
            return section;
        }

        for (category, records) in &self.groups {
            section.push_str(&format!("### {} {}\n", category.heading(), category.description()));
            for record in records {
                let line = format_entry(&record.message, record.insertions, record.deletions);
                section.push_str(&format!("- {}\n", line));
            }
            section.push('\n');
        }

        section.push_str(&format!(
            "**Total Changes:** {} commits\n\n---\n\n",
            self.total_commits()
        ));
        section
    }
}

/// Render a release section for `records`, oldest first.
pub fn render_release_section(tag: &str, date: NaiveDate, records: &[CommitRecord]) -> String {
    ReleaseSection::new(tag, date, records).render()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(message: &str, insertions: usize, deletions: usize) -> CommitRecord {
        CommitRecord {
            hash: "0".repeat(40),
            message: message.to_string(),
            author: "Test User".to_string(),
            date: "Mon Oct 19 12:00:00 2026 +0000".to_string(),
            body: String::new(),
            insertions,
            deletions,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_empty_release_uses_placeholder_headings() {
        let section = render_release_section("v1.0.0", date(), &[]);

        assert_eq!(
            section,
            "## [v1.0.0] - 2026-10-19\n\n\
             ### ✨ Added\n- N/A\n\n\
             ### 🔧 Changed\n- N/A\n\n\
             ### 🐛 Fixed\n- N/A\n\n\
             ---\n\n"
        );
        assert_eq!(section.matches("### ").count(), 3);
        assert_eq!(section.matches("- N/A").count(), 3);
        assert!(!section.contains("Total Changes"));
    }

    #[test]
    fn test_groups_follow_display_order() {
        let records = vec![
            record("docs: update guide", 4, 1),
            record("fix: resolve crash on divide by zero", 15, 3),
            record("feat: add history panel", 120, 0),
        ];
        let section = render_release_section("v1.1.0", date(), &records);

        let added = section.find("### ✨ Added").unwrap();
        let fixed = section.find("### 🐛 Fixed").unwrap();
        let docs = section.find("### 📚 Documentation").unwrap();
        assert!(added < fixed && fixed < docs);

        assert!(
            section.contains("### ✨ Added New features and enhancements\n- Add history panel `+120`\n\n")
        );
        assert!(section.contains("- Resolve crash on divide by zero `+15, -3`\n"));
        assert!(section.ends_with("**Total Changes:** 3 commits\n\n---\n\n"));
    }

    #[test]
    fn test_records_keep_oldest_first_within_group() {
        let records = vec![record("fix: first", 0, 0), record("fix: second", 0, 0)];
        let section = render_release_section("v1.0.1", date(), &records);

        assert!(section.contains("### 🐛 Fixed Bug fixes and improvements\n- First\n- Second\n\n"));
    }

    #[test]
    fn test_shared_labels_render_separate_groups() {
        let records = vec![record("ci: cache cargo", 0, 0), record("chore: bump version", 0, 0)];
        let section = ReleaseSection::new("v2.0.0", date(), &records);

        assert_eq!(
            section.count_by_category(),
            vec![(Category::Chore, 1), (Category::Ci, 1)]
        );
        let rendered = section.render();
        assert!(rendered.contains("### 🔧 Changed Maintenance tasks and chores\n"));
        assert!(rendered.contains("### 🔧 Changed CI/CD pipeline changes\n"));
    }

    #[test]
    fn test_every_record_counted_once() {
        let records: Vec<_> = ["feat: a", "b", "fix: c", "remove d", "perf: e"]
            .iter()
            .map(|m| record(m, 1, 1))
            .collect();
        let section = ReleaseSection::new("v3.0.0", date(), &records);

        assert_eq!(section.total_commits(), records.len());
        assert_eq!(section.render().matches("\n- ").count(), records.len());
    }
}
