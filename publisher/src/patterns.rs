//! Search pattern parsing.
//!
//! The `SearchPattern` input is a newline-delimited list of glob patterns.
//! This module turns that raw text into an ordered list of [`SearchPattern`]
//! values without touching the filesystem.

use std::fmt;

/// Default search pattern used when the `SearchPattern` input is absent.
pub const DEFAULT_SEARCH_PATTERN: &str = r"**\bin\**\*.pdb";

/// A single trimmed, non-empty glob pattern.
///
/// Instances only come out of [`parse_patterns`], so the non-empty and
/// trimmed guarantees hold for every value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchPattern(String);

impl SearchPattern {
    /// Get the pattern as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SearchPattern {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse a multi-line pattern string into an ordered list of patterns.
///
/// Lines are trimmed and blank lines dropped. Order is preserved and
/// duplicates are kept.
///
/// # Examples
///
/// ```
/// use symbol_publisher::patterns::parse_patterns;
///
/// let patterns = parse_patterns("  **/*.pdb \n\n\t\n**/*.dll\n");
/// let raw: Vec<&str> = patterns.iter().map(|p| p.as_str()).collect();
/// assert_eq!(raw, ["**/*.pdb", "**/*.dll"]);
/// ```
#[must_use]
pub fn parse_patterns(raw: &str) -> Vec<SearchPattern> {
    raw.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| SearchPattern(line.to_owned()))
        .collect()
}
