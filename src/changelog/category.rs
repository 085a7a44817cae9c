//! Commit categories and their display metadata.

use std::fmt;

/// The category a commit is filed under in a release section.
///
/// [`Category::ALL`] is the display order of release sections. Matching
/// priority for keyword heuristics lives separately in
/// [`crate::changelog::classify::KEYWORD_RULES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Feature,
    Fix,
    Docs,
    Style,
    Refactor,
    Performance,
    Test,
    Chore,
    Security,
    Build,
    Ci,
    Revert,
    Remove,
    Dependencies,
}

impl Category {
    /// Every category, in the order sections are rendered.
    pub const ALL: [Category; 14] = [
        Self::Feature,
        Self::Fix,
        Self::Docs,
        Self::Style,
        Self::Refactor,
        Self::Performance,
        Self::Test,
        Self::Chore,
        Self::Security,
        Self::Build,
        Self::Ci,
        Self::Revert,
        Self::Remove,
        Self::Dependencies,
    ];

    /// Conventional commit type keyword, e.g. `feat`.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Feature => "feat",
            Self::Fix => "fix",
            Self::Docs => "docs",
            Self::Style => "style",
            Self::Refactor => "refactor",
            Self::Performance => "perf",
            Self::Test => "test",
            Self::Chore => "chore",
            Self::Security => "security",
            Self::Build => "build",
            Self::Ci => "ci",
            Self::Revert => "revert",
            Self::Remove => "remove",
            Self::Dependencies => "deps",
        }
    }

    /// Emoji and Keep a Changelog label, e.g. `✨ Added`.
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Feature => "✨ Added",
            Self::Fix => "🐛 Fixed",
            Self::Docs => "📚 Documentation",
            Self::Style => "🎨 Changed",
            Self::Refactor => "🔧 Changed",
            Self::Performance => "🚀 Performance",
            Self::Test => "🧪 Testing",
            Self::Chore => "🔧 Changed",
            Self::Security => "🛡️ Security",
            Self::Build => "🔧 Changed",
            Self::Ci => "🔧 Changed",
            Self::Revert => "🔄 Changed",
            Self::Remove => "🗑️ Removed",
            Self::Dependencies => "📦 Changed",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Feature => "New features and enhancements",
            Self::Fix => "Bug fixes and improvements",
            Self::Docs => "Documentation updates",
            Self::Style => "Code style and formatting changes",
            Self::Refactor => "Code refactoring and restructuring",
            Self::Performance => "Performance improvements",
            Self::Test => "Test additions and improvements",
            Self::Chore => "Maintenance tasks and chores",
            Self::Security => "Security improvements",
            Self::Build => "Build system changes",
            Self::Ci => "CI/CD pipeline changes",
            Self::Revert => "Reverted changes",
            Self::Remove => "Removed features and cleanup",
            Self::Dependencies => "Dependency updates",
        }
    }

    /// Position in [`Category::ALL`].
    pub fn order(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.key() == lower)
            .ok_or_else(|| format!("Unknown commit type: {}", s))
    }
}
