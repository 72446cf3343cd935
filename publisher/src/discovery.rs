//! Symbol file discovery.
//!
//! Expands each [`SearchPattern`] relative to the symbols folder and keeps
//! the matches that are regular files. Patterns are expanded one at a time,
//! in order, so the resulting list follows pattern order first and match
//! order second.

use crate::patterns::SearchPattern;
use camino::{Utf8Path, Utf8PathBuf};
use glob::{MatchOptions, Pattern};
use log::{debug, trace};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// A path that named a regular file when it was discovered.
///
/// The `From<Utf8PathBuf>` conversion does not touch the filesystem; values
/// built that way carry no guarantee beyond what the caller checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiscoveredFile(Utf8PathBuf);

impl DiscoveredFile {
    /// Borrow the file path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.0
    }
}

impl AsRef<Utf8Path> for DiscoveredFile {
    fn as_ref(&self) -> &Utf8Path {
        &self.0
    }
}

impl From<Utf8PathBuf> for DiscoveredFile {
    fn from(path: Utf8PathBuf) -> Self {
        Self(path)
    }
}

impl fmt::Display for DiscoveredFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors arising while expanding search patterns.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// The pattern could not be compiled as a glob.
    #[error("invalid search pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending pattern as supplied.
        pattern: String,
        /// Why the glob compiler rejected it.
        reason: String,
    },

    /// A directory could not be read while expanding a pattern.
    #[error("failed to read {path} while expanding '{pattern}': {source}")]
    Unreadable {
        /// The pattern being expanded.
        pattern: String,
        /// The path that could not be read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A matching file has a path that cannot be written to the manifest.
    #[error("matched path is not valid UTF-8: {path}")]
    NonUtf8Path {
        /// Lossy rendering of the path.
        path: String,
    },
}

/// Expand `patterns` under `base_folder` and return the matching files.
///
/// Directories, and symbolic links that resolve to directories, are
/// excluded. A file matched by two patterns is listed twice; a file produced
/// twice by the same pattern is listed once, including a file reached again
/// through a symbolic link that loops back to one of its ancestors. An empty
/// result is not an error.
///
/// # Errors
///
/// Returns [`DiscoveryError`] when a pattern is malformed, a directory cannot
/// be read, or a matched path is not valid UTF-8.
pub fn discover_files(
    base_folder: &Utf8Path,
    patterns: &[SearchPattern],
) -> Result<Vec<DiscoveredFile>, DiscoveryError> {
    let mut files = Vec::new();
    for pattern in patterns {
        let matched = expand_pattern(base_folder, pattern)?;
        debug!("pattern '{pattern}' matched {} file(s)", matched.len());
        files.extend(matched);
    }
    Ok(files)
}

/// Expand a single pattern, preserving the order reported by the walker.
fn expand_pattern(
    base_folder: &Utf8Path,
    pattern: &SearchPattern,
) -> Result<Vec<DiscoveredFile>, DiscoveryError> {
    let expression = search_expression(base_folder, pattern);
    trace!("expanding search expression {expression}");

    let walker = glob::glob_with(&expression, match_options()).map_err(|e| {
        DiscoveryError::InvalidPattern {
            pattern: pattern.as_str().to_owned(),
            reason: e.msg.to_owned(),
        }
    })?;

    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut files = Vec::new();
    for entry in walker {
        let path = entry.map_err(|e| DiscoveryError::Unreadable {
            pattern: pattern.as_str().to_owned(),
            path: e.path().display().to_string(),
            source: e.into(),
        })?;

        if !path.is_file() {
            trace!("skipping non-file match {}", path.display());
            continue;
        }
        if !seen.insert(match_key(&path)) {
            debug!("skipping repeated match {}", path.display());
            continue;
        }

        let utf8 = Utf8PathBuf::try_from(path).map_err(|e| DiscoveryError::NonUtf8Path {
            path: e.as_path().display().to_string(),
        })?;
        files.push(DiscoveredFile(utf8));
    }
    Ok(files)
}

/// Join the base folder and the pattern into one glob expression.
///
/// The base folder is escaped so that brackets or asterisks in a directory
/// name are matched literally. Leading separators on the pattern are dropped
/// so the pattern never escapes the base folder.
fn search_expression(base_folder: &Utf8Path, pattern: &SearchPattern) -> String {
    let normalized = normalize_separators(pattern.as_str());
    let relative = normalized.trim_start_matches(['/', '\\']);
    let escaped = Pattern::escape(base_folder.as_str());
    let base = escaped.trim_end_matches(['/', '\\']);
    format!("{base}/{relative}")
}

/// Identify a match by its resolved parent directory and its own file name.
///
/// Matches reached through a directory cycle share a key, while a symbolic
/// link to a file keeps its own name and stays distinct from its target.
fn match_key(path: &Path) -> PathBuf {
    path.parent()
        .and_then(|parent| fs::canonicalize(parent).ok())
        .zip(path.file_name())
        .map_or_else(|| path.to_path_buf(), |(parent, name)| parent.join(name))
}

/// Rewrite Windows-style separators so patterns written for Windows runners
/// also work elsewhere.
#[cfg(not(windows))]
fn normalize_separators(pattern: &str) -> String {
    pattern.replace('\\', "/")
}

#[cfg(windows)]
fn normalize_separators(pattern: &str) -> String {
    pattern.to_owned()
}

const fn match_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: !cfg!(windows),
        require_literal_separator: true,
        require_literal_leading_dot: false,
    }
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
