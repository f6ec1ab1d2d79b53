//! Exclusion pattern compilation and matching
//!
//! Patterns are wildcards over full paths: a literal `*` matches any run
//! of characters (including path separators), every other character
//! matches itself, and the whole comparison is case-insensitive. There is
//! no `?`, no character classes, no brace expansion. A pattern without a
//! `*` therefore behaves as a plain substring test.

use crate::types::SyncError;
use regex::{Regex, RegexBuilder};
use std::path::Path;

/// One compiled exclusion pattern, keeping the raw form for messages.
#[derive(Debug, Clone)]
pub struct ExclusionPattern {
    raw: String,
    regex: Regex,
}

impl ExclusionPattern {
    /// Compile a single raw pattern.
    ///
    /// The raw text is escaped wholesale so separators and regex
    /// metacharacters match literally, then each escaped `*` is widened
    /// back into "match anything".
    pub fn compile(raw: &str) -> Result<Self, SyncError> {
        let expanded = regex::escape(raw).replace(r"\*", ".*");
        let regex = RegexBuilder::new(&expanded)
            .case_insensitive(true)
            .build()
            .map_err(|e| SyncError::Pattern {
                pattern: raw.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            raw: raw.to_string(),
            regex,
        })
    }

    /// The pattern as supplied by the caller.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Test the pattern against a full path. Unanchored, like the
    /// substring semantics of the original wildcard syntax.
    pub fn matches(&self, path: &Path) -> bool {
        self.regex.is_match(&path.to_string_lossy())
    }
}

/// The compiled exclusion set for one sync invocation.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    patterns: Vec<ExclusionPattern>,
}

impl ExclusionSet {
    /// Compile all raw patterns. Fails on the first uncompilable pattern.
    pub fn compile(raw_patterns: &[String]) -> Result<Self, SyncError> {
        let patterns = raw_patterns
            .iter()
            .map(|raw| ExclusionPattern::compile(raw))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// First pattern matching `path`, if any. Short-circuits on the first
    /// hit so later patterns are never evaluated.
    pub fn first_match(&self, path: &Path) -> Option<&ExclusionPattern> {
        self.patterns.iter().find(|pattern| pattern.matches(path))
    }

    /// True if any pattern matches `path`.
    pub fn matches(&self, path: &Path) -> bool {
        self.first_match(path).is_some()
    }

    /// Number of compiled patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// True when no patterns were supplied.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
