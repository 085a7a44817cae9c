//! Commit classification, release rendering and changelog writing.

pub mod category;
pub mod classify;
pub mod document;
pub mod format;
pub mod render;
pub mod writer;

pub use category::Category;
pub use classify::classify;
pub use document::ChangelogDocument;
pub use format::format_entry;
pub use render::{ReleaseSection, render_release_section};
pub use writer::{WriteOptions, WriteSummary, update_changelog};
