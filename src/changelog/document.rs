//! Structured model of a changelog file.
//!
//! A document is an ordered list of blocks: a preamble followed by one block
//! per `## ` heading. Lines keep their original endings, so an unmodified
//! document serializes back to exactly the text it was parsed from.

use std::fmt;

use tracing::debug;

use super::render::PLACEHOLDER_HEADINGS;

/// A heading line and the lines up to the next `## ` heading.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Block {
    /// `None` for the preamble and for text split off behind an inserted release.
    heading: Option<String>,
    lines: Vec<String>,
}

impl Block {
    fn release_name(&self) -> Option<&str> {
        self.heading
            .as_deref()
            .and_then(|h| h.strip_prefix("## "))
            .map(extract_release_name)
    }

    fn is_unreleased(&self) -> bool {
        self.release_name()
            .is_some_and(|name| name.eq_ignore_ascii_case("unreleased"))
    }

    fn ends_with_blank_line(&self) -> bool {
        match self.lines.last() {
            Some(line) => line.trim().is_empty() && line.ends_with('\n'),
            None => self.heading.is_none(),
        }
    }
}

/// A changelog split into blocks by `## ` headings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogDocument {
    blocks: Vec<Block>,
}

impl ChangelogDocument {
    /// Split `content` into a preamble and release blocks.
    pub fn parse(content: &str) -> Self {
        let mut blocks = vec![Block {
            heading: None,
            lines: Vec::new(),
        }];

        for line in content.split_inclusive('\n') {
            if line.starts_with("## ") {
                blocks.push(Block {
                    heading: Some(line.to_string()),
                    lines: Vec::new(),
                });
            } else if let Some(current) = blocks.last_mut() {
                current.lines.push(line.to_string());
            }
        }

        Self { blocks }
    }

    /// Header plus an empty `[Unreleased]` section, for a changelog that does not exist yet.
    pub fn default_skeleton(project_name: Option<&str>) -> Self {
        let mut content = changelog_header(project_name);
        content.push_str("## [Unreleased]\n\n");
        for category in PLACEHOLDER_HEADINGS {
            content.push_str(&format!("### {}\n- N/A\n\n", category.heading()));
        }
        content.push_str("---\n\n");
        Self::parse(&content)
    }

    /// Whether a `## [<tag>]` section exists.
    pub fn contains_release(&self, tag: &str) -> bool {
        self.blocks.iter().any(|b| b.release_name() == Some(tag))
    }

    /// Names of all release sections in document order, `Unreleased` included.
    #[cfg(test)]
    fn release_names(&self) -> Vec<&str> {
        self.blocks.iter().filter_map(Block::release_name).collect()
    }

    /// Swap the `## [<tag>]` section for `section`, keeping its position.
    ///
    /// Text after the old section's `---` rule is kept behind the new
    /// section. Returns whether a section for `tag` was found.
    pub fn replace_release(&mut self, tag: &str, section: &str) -> bool {
        let Some(index) = self.blocks.iter().position(|b| b.release_name() == Some(tag)) else {
            return false;
        };

        let old = self.blocks.remove(index);
        let tail = match separator_end(&old.lines) {
            Some(split_at) => old.lines[split_at..].to_vec(),
            None => Vec::new(),
        };
        debug!(tag, block = index, kept_lines = tail.len(), "Replacing release in place");

        self.splice(index, section_blocks(section), tail);
        true
    }

    /// Insert a rendered release section.
    ///
    /// The section goes directly after the first `---` line at or below the
    /// `[Unreleased]` heading (and the blank line following it). Without such
    /// a marker it is appended at the end.
    pub fn insert_release(&mut self, section: &str) {
        let new_blocks = section_blocks(section);

        match self.find_separator() {
            Some((index, split_at)) => {
                debug!(block = index, line = split_at, "Inserting release after separator");
                let tail = self.blocks[index].lines.split_off(split_at);
                self.splice(index + 1, new_blocks, tail);
            }
            None => {
                debug!("No separator after [Unreleased]; appending release at end");
                self.append_blocks(new_blocks);
            }
        }
    }

    /// Block index and line offset just past the separator following `[Unreleased]`.
    fn find_separator(&self) -> Option<(usize, usize)> {
        let start = self.blocks.iter().position(Block::is_unreleased)?;

        self.blocks
            .iter()
            .enumerate()
            .skip(start)
            .find_map(|(index, block)| separator_end(&block.lines).map(|end| (index, end)))
    }

    /// Insert `new_blocks` at `index`, followed by `tail` as a headless block.
    fn splice(&mut self, index: usize, new_blocks: Vec<Block>, tail: Vec<String>) {
        let mut insert_at = index;
        for block in new_blocks {
            self.blocks.insert(insert_at, block);
            insert_at += 1;
        }
        if !tail.is_empty() {
            self.blocks.insert(
                insert_at,
                Block {
                    heading: None,
                    lines: tail,
                },
            );
        }
    }

    fn append_blocks(&mut self, new_blocks: Vec<Block>) {
        let is_empty = self.to_string().is_empty();
        if let Some(last) = self.blocks.last_mut() {
            match last.lines.last_mut() {
                Some(line) if !line.ends_with('\n') => line.push('\n'),
                None if last.heading.as_deref().is_some_and(|h| !h.ends_with('\n')) => {
                    if let Some(heading) = last.heading.as_mut() {
                        heading.push('\n');
                    }
                }
                _ => {}
            }
            if !is_empty && !last.ends_with_blank_line() {
                last.lines.push("\n".to_string());
            }
        }
        self.blocks.extend(new_blocks);
    }
}

impl fmt::Display for ChangelogDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for block in &self.blocks {
            if let Some(heading) = &block.heading {
                f.write_str(heading)?;
            }
            for line in &block.lines {
                f.write_str(line)?;
            }
        }
        Ok(())
    }
}

/// Blocks of a rendered section, without its empty preamble.
fn section_blocks(section: &str) -> Vec<Block> {
    ChangelogDocument::parse(section)
        .blocks
        .into_iter()
        .filter(|b| b.heading.is_some() || !b.lines.is_empty())
        .collect()
}

/// Line offset just past the first `---` rule and one blank line after it.
fn separator_end(lines: &[String]) -> Option<usize> {
    let rule = lines.iter().position(|l| l.trim_end() == "---")?;
    let mut end = rule + 1;
    if lines.get(end).is_some_and(|l| l.trim().is_empty()) {
        end += 1;
    }
    Some(end)
}

/// Keep a Changelog header for new files.
pub fn changelog_header(project_name: Option<&str>) -> String {
    let subject = match project_name {
        Some(name) => format!("the {} project", name),
        None => "this project".to_string(),
    };

    format!(
        "# Changelog\n\n\
         All notable changes to {} will be documented in this file.\n\n\
         The format is based on [Keep a Changelog](https://keepachangelog.com/en/1.0.0/),\n\
         and this project adheres to [Semantic Versioning](https://semver.org/spec/v2.0.0.html).\n\n",
        subject
    )
}

/// Extract the release name from a section title.
/// e.g., "[1.2.3] - 2024-01-01" -> "1.2.3"
fn extract_release_name(title: &str) -> &str {
    let title = title.trim();

    if let Some(rest) = title.strip_prefix('[') {
        if let Some(end) = rest.find(']') {
            return &rest[..end];
        }
    }

    if let Some(dash_pos) = title.find(" - ") {
        return title[..dash_pos].trim();
    }

    title
}
