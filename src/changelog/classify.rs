//! Heuristic commit classification.
//!
//! Rules are applied in strict priority order:
//!
//! 1. An explicit `<type>:` prefix for a known type. Scoped (`feat(ui):`)
//!    and breaking (`refactor!:`) forms are left to the keyword rules.
//! 2. Keyword rules in [`KEYWORD_RULES`] order; the first rule with any
//!    trigger occurring in the message wins, regardless of where in the
//!    message the trigger sits.
//! 3. [`Category::Chore`].

use std::sync::LazyLock;

use regex_lite::Regex;

use super::category::Category;

/// `type`, optional `(scope)`, optional `!`, then `:` and any spaces.
static PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z]+)(?:\([^)]*\))?!?:\s*").expect("prefix pattern is valid")
});

/// Keyword triggers in matching priority.
///
/// This order is independent of [`Category::ALL`]; the last rule catches
/// generic change wording and files it as a chore.
pub const KEYWORD_RULES: &[(Category, &[&str])] = &[
    (
        Category::Feature,
        &["add", "new", "feature", "implement", "create", "introduce", "calculator", "chart"],
    ),
    (Category::Fix, &["fix", "bug", "issue", "error", "resolve", "crash"]),
    (Category::Docs, &["doc", "readme", "comment", "changelog", "update readme"]),
    (
        Category::Style,
        &["style", "format", "indent", "ui", "ux", "css", "styling", "tailwind"],
    ),
    (Category::Refactor, &["refactor", "restructure", "clean", "optimize", "enhance"]),
    (Category::Performance, &["perf", "performance", "speed", "optimize"]),
    (Category::Test, &["test", "spec", "coverage", "testing"]),
    (Category::Security, &["security", "vulnerability", "auth", "protect"]),
    (Category::Remove, &["remove", "delete", "cleanup", "deprecate", "drop"]),
    (
        Category::Dependencies,
        &["deps", "dependency", "package", "npm", "yarn", "install"],
    ),
    (Category::Chore, &["update", "change", "modify", "improve", "enhance"]),
];

/// A recognized conventional commit prefix at the start of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConventionalPrefix {
    pub category: Category,
    /// Byte length of the prefix including trailing whitespace.
    pub len: usize,
}

/// Detect a leading `type:` / `type(scope):` / `type!:` prefix for a known type.
pub fn parse_prefix(message: &str) -> Option<ConventionalPrefix> {
    let caps = PREFIX_RE.captures(message)?;
    let category = caps.get(1)?.as_str().parse::<Category>().ok()?;
    let len = caps.get(0)?.end();
    Some(ConventionalPrefix { category, len })
}

/// Classify a commit subject into exactly one category.
pub fn classify(message: &str) -> Category {
    let lower = message.to_lowercase();

    if let Some(category) = Category::ALL
        .into_iter()
        .find(|c| lower.strip_prefix(c.key()).is_some_and(|rest| rest.starts_with(':')))
    {
        return category;
    }

    KEYWORD_RULES
        .iter()
        .find(|(_, triggers)| triggers.iter().any(|word| lower.contains(word)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Chore)
}
