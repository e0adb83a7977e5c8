//! Deduplication of overlapping search roots.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// An ordered set of search roots with overlapping roots collapsed.
///
/// This is a flat list rather than a prefix tree. Each insertion resolves
/// containment against the first overlapping root only, so a short root that
/// covers two existing roots replaces the first and leaves the second in
/// place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootSet {
    prefixes: Vec<OsString>,
}

impl RootSet {
    /// Create an empty root set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a root candidate.
    ///
    /// Returns `false` if an existing root already covers `candidate`.
    /// Otherwise the first existing root covered by `candidate` is replaced,
    /// or `candidate` is appended, and `true` is returned.
    pub fn insert(&mut self, candidate: impl Into<OsString>) -> bool {
        let candidate = candidate.into();
        let bytes = candidate.as_encoded_bytes();

        for (i, prefix) in self.prefixes.iter().enumerate() {
            let existing = prefix.as_encoded_bytes();
            if bytes.starts_with(existing) {
                tracing::debug!(candidate = ?candidate, covered_by = ?prefix, "root already covered");
                return false;
            } else if existing.starts_with(bytes) {
                tracing::debug!(candidate = ?candidate, replaces = ?prefix, "root subsumes existing root");
                self.prefixes[i] = candidate;
                return true;
            }
        }

        self.prefixes.push(candidate);
        true
    }

    /// Insert an absolute directory path, terminated with a separator so that
    /// `/a/b` does not cover `/a/bc`.
    pub fn insert_path(&mut self, path: &Path) -> bool {
        let mut candidate = path.as_os_str().to_owned();
        if !ends_with_separator(&candidate) {
            candidate.push(MAIN_SEPARATOR.to_string());
        }
        self.insert(candidate)
    }

    /// Current roots in insertion/replacement order.
    pub fn prefixes(&self) -> &[OsString] {
        &self.prefixes
    }

    /// Current roots as paths to traverse.
    pub fn paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.prefixes.iter().map(PathBuf::from)
    }

    /// Number of roots.
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Check if the set holds no roots.
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

fn ends_with_separator(s: &OsStr) -> bool {
    s.as_encoded_bytes()
        .last()
        .is_some_and(|&b| std::path::is_separator(b as char))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_collapses_roots() {
        let mut roots = RootSet::new();

        assert!(roots.insert("github.com/kbrgl/shallowradix"));
        assert!(roots.insert("github.com/kbrgl"));
        assert!(roots.insert("github.com/"));
        assert!(!roots.insert("github.com/kbrgl/isnochys-syntax"));
        assert!(roots.insert("golang.org/pkg/path"));
        assert!(!roots.insert("golang.org/pkg/path/filepath"));

        assert_eq!(roots.len(), 2);
        assert_eq!(roots.prefixes()[0], "github.com/");
        assert_eq!(roots.prefixes()[1], "golang.org/pkg/path");
    }

    #[test]
    fn test_duplicate_is_rejected() {
        let mut roots = RootSet::new();
        assert!(roots.insert("/srv/"));
        assert!(!roots.insert("/srv/"));
        assert_eq!(roots.len(), 1);
    }

    #[test]
    fn test_only_first_overlap_is_replaced() {
        let mut roots = RootSet::new();
        assert!(roots.insert("/a/x/"));
        assert!(roots.insert("/a/y/"));
        assert!(roots.insert("/a/"));

        // `/a/` covers both, but only the first was replaced.
        assert_eq!(roots.prefixes()[0], "/a/");
        assert_eq!(roots.prefixes()[1], "/a/y/");
    }

    #[test]
    fn test_insert_path_appends_separator() {
        let mut roots = RootSet::new();
        assert!(roots.insert_path(Path::new("/home/ab")));
        assert!(roots.insert_path(Path::new("/home/abc")));
        assert!(!roots.insert_path(Path::new("/home/ab/src")));

        let expected = format!("/home/ab{MAIN_SEPARATOR}");
        assert_eq!(roots.prefixes()[0], expected.as_str());
        assert_eq!(roots.len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_insert_path_filesystem_root() {
        let mut roots = RootSet::new();
        assert!(roots.insert_path(Path::new("/")));
        assert!(!roots.insert_path(Path::new("/usr")));
        assert_eq!(roots.prefixes()[0], "/");
        assert_eq!(roots.paths().collect::<Vec<_>>(), vec![PathBuf::from("/")]);
    }
}
