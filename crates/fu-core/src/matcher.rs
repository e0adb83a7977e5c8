//! Entry predicates.
//!
//! A search combines exactly one name matcher (exact, prefix, suffix,
//! substring, fuzzy, regex or all) with any number of stackable matchers
//! (permission, directory-only and age bounds). Matchers hold no mutable
//! state and are shared read-only by every traversal worker.

use std::fmt;
use std::time::{Duration, SystemTime};

use compact_str::CompactString;
use regex::Regex;

use crate::entry::EntryMeta;
use crate::error::SearchError;

/// A predicate over [`EntryMeta`].
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Basename equals the expected name.
    Exact(CompactString),
    /// Basename starts with the prefix.
    Prefix(CompactString),
    /// Basename ends with the suffix.
    Suffix(CompactString),
    /// Basename contains the needle.
    Substring(CompactString),
    /// Pattern characters form a case-insensitive subsequence of the basename.
    /// Stored lowercased.
    Fuzzy(CompactString),
    /// Basename matches the compiled expression anywhere.
    Regex(Regex),
    /// At least one of the mask's permission bits is set.
    Permission(u32),
    /// Entry is a directory.
    DirectoryOnly,
    /// Entry was last modified longer ago than the duration.
    OlderThan(Duration),
    /// Entry was last modified more recently than the duration.
    YoungerThan(Duration),
    /// Matches everything.
    All,
}

impl Matcher {
    /// Exact name matcher.
    pub fn exact(expected: impl Into<CompactString>) -> Self {
        Self::Exact(expected.into())
    }

    /// Prefix name matcher.
    pub fn prefix(prefix: impl Into<CompactString>) -> Self {
        Self::Prefix(prefix.into())
    }

    /// Suffix name matcher.
    pub fn suffix(suffix: impl Into<CompactString>) -> Self {
        Self::Suffix(suffix.into())
    }

    /// Substring name matcher.
    pub fn substring(needle: impl Into<CompactString>) -> Self {
        Self::Substring(needle.into())
    }

    /// Fuzzy name matcher.
    ///
    /// The pattern is lowercased per char, the same way names are.
    pub fn fuzzy(pattern: &str) -> Self {
        Self::Fuzzy(pattern.chars().flat_map(char::to_lowercase).collect())
    }

    /// Regular expression name matcher.
    ///
    /// Fails if `pattern` does not compile.
    pub fn regex(pattern: &str) -> Result<Self, SearchError> {
        Regex::new(pattern)
            .map(Self::Regex)
            .map_err(|source| SearchError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    /// Whether this matcher selects on the basename.
    pub fn is_name_matcher(&self) -> bool {
        matches!(
            self,
            Self::Exact(_)
                | Self::Prefix(_)
                | Self::Suffix(_)
                | Self::Substring(_)
                | Self::Fuzzy(_)
                | Self::Regex(_)
                | Self::All
        )
    }

    /// Test an entry against the current time.
    pub fn is_match(&self, entry: &EntryMeta) -> bool {
        self.is_match_at(entry, SystemTime::now())
    }

    /// Test an entry, measuring ages relative to `now`.
    pub fn is_match_at(&self, entry: &EntryMeta, now: SystemTime) -> bool {
        let name = entry.name.as_str();
        match self {
            Self::Exact(expected) => name == expected.as_str(),
            Self::Prefix(prefix) => name.starts_with(prefix.as_str()),
            Self::Suffix(suffix) => name.ends_with(suffix.as_str()),
            Self::Substring(needle) => name.contains(needle.as_str()),
            Self::Fuzzy(pattern) => fuzzy_match(pattern, name),
            Self::Regex(re) => re.is_match(name),
            Self::Permission(mask) => entry.mode & mask != 0,
            Self::DirectoryOnly => entry.is_dir,
            // A modification time in the future is younger than any bound.
            Self::OlderThan(bound) => now
                .duration_since(entry.modified)
                .is_ok_and(|age| age > *bound),
            Self::YoungerThan(bound) => now
                .duration_since(entry.modified)
                .map_or(true, |age| age < *bound),
            Self::All => true,
        }
    }
}

/// Case-insensitive subsequence test. `pattern` must already be lowercase.
fn fuzzy_match(pattern: &str, name: &str) -> bool {
    let mut needle = pattern.chars().peekable();
    for c in name.chars().flat_map(char::to_lowercase) {
        match needle.peek() {
            Some(&n) if n == c => {
                needle.next();
            }
            Some(_) => {}
            None => break,
        }
    }
    needle.peek().is_none()
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(s) => write!(f, "name == {s:?}"),
            Self::Prefix(s) => write!(f, "name starts with {s:?}"),
            Self::Suffix(s) => write!(f, "name ends with {s:?}"),
            Self::Substring(s) => write!(f, "name contains {s:?}"),
            Self::Fuzzy(s) => write!(f, "name fuzzy {s:?}"),
            Self::Regex(re) => write!(f, "name =~ /{}/", re.as_str()),
            Self::Permission(mask) => write!(f, "mode & {mask:#o}"),
            Self::DirectoryOnly => f.write_str("directory"),
            Self::OlderThan(d) => write!(f, "older than {d:?}"),
            Self::YoungerThan(d) => write!(f, "younger than {d:?}"),
            Self::All => f.write_str("any"),
        }
    }
}
