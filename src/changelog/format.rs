//! Changelog line formatting.

use super::classify::parse_prefix;

/// Strip one conventional prefix and capitalize the first character.
pub fn clean_message(message: &str) -> String {
    let rest = match parse_prefix(message) {
        Some(prefix) => &message[prefix.len..],
        None => message,
    };

    let mut chars = rest.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Compact `+N, -M` annotation, or `None` when both counts are zero.
pub fn stats_badge(insertions: usize, deletions: usize) -> Option<String> {
    let mut parts = Vec::with_capacity(2);
    if insertions > 0 {
        parts.push(format!("+{}", insertions));
    }
    if deletions > 0 {
        parts.push(format!("-{}", deletions));
    }

    if parts.is_empty() {
        None
    } else {
        Some(format!("`{}`", parts.join(", ")))
    }
}

/// Format a commit subject as a changelog line, e.g. ``Fix crash `+15, -3` ``.
pub fn format_entry(message: &str, insertions: usize, deletions: usize) -> String {
    let cleaned = clean_message(message);
    match stats_badge(insertions, deletions) {
        Some(badge) => format!("{} {}", cleaned, badge),
        None => cleaned,
    }
}
