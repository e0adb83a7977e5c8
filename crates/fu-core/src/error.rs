//! Error types for search construction and traversal.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal errors raised while assembling a search, before traversal begins.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The regular expression query did not compile.
    #[error("invalid regular expression {pattern:?}: {}", regex_reason(.source))]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A root path could not be resolved to an absolute path.
    #[error("cannot resolve path {path}: {source}")]
    UnresolvableRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Root path is not a directory.
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// A duration flag could not be parsed.
    #[error("invalid duration {input:?}: {message}")]
    InvalidDuration { input: String, message: String },

    /// A permission mask could not be parsed.
    #[error("invalid permission mask {input:?}")]
    InvalidPermission { input: String },

    /// Invalid configuration.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl SearchError {
    /// Create a root resolution error with path context.
    pub fn unresolvable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::UnresolvableRoot {
            path: path.into(),
            source,
        }
    }
}

/// Syntax errors render as a multi-line diagram; keep only the final reason.
fn regex_reason(err: &regex::Error) -> String {
    let text = err.to_string();
    let last = text.lines().last().unwrap_or_default().trim();
    last.strip_prefix("error: ").unwrap_or(last).to_string()
}

/// Kind of per-entry warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Permission was denied.
    PermissionDenied,
    /// Symbolic link target does not exist.
    BrokenSymlink,
    /// Entry vanished between listing and stat.
    NotFound,
    /// Error reading a directory.
    ReadError,
    /// Error reading metadata.
    MetadataError,
}

/// Non-fatal error encountered for a single entry during traversal.
///
/// The entry is skipped and the walk continues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl EntryWarning {
    /// Create a new entry warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Classify an I/O error raised while reading `path`.
    ///
    /// `fallback` is used for error kinds with no dedicated warning kind.
    pub fn from_io(path: impl Into<PathBuf>, error: &std::io::Error, fallback: WarningKind) -> Self {
        let path = path.into();
        let kind = match error.kind() {
            std::io::ErrorKind::PermissionDenied => WarningKind::PermissionDenied,
            std::io::ErrorKind::NotFound if is_symlink(&path) => WarningKind::BrokenSymlink,
            std::io::ErrorKind::NotFound => WarningKind::NotFound,
            _ => fallback,
        };
        Self {
            message: format!("{}: {error}", path.display()),
            path,
            kind,
        }
    }
}

impl std::fmt::Display for EntryWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

fn is_symlink(path: &std::path::Path) -> bool {
    std::fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_warning_from_io() {
        let warning = EntryWarning::from_io(
            "/test/path",
            &std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            WarningKind::ReadError,
        );
        assert_eq!(warning.kind, WarningKind::PermissionDenied);
        assert!(warning.message.starts_with("/test/path"));
    }

    #[test]
    fn test_entry_warning_fallback_kind() {
        let warning = EntryWarning::from_io(
            "/test/path",
            &std::io::Error::other("boom"),
            WarningKind::MetadataError,
        );
        assert_eq!(warning.kind, WarningKind::MetadataError);
        assert_eq!(warning.to_string(), "/test/path: boom");
    }

    #[test]
    fn test_search_error_display() {
        let err = SearchError::NotADirectory {
            path: PathBuf::from("/etc/passwd"),
        };
        assert_eq!(err.to_string(), "path is not a directory: /etc/passwd");
    }

    #[test]
    fn test_invalid_pattern_is_one_line() {
        let source = regex::Regex::new("[").unwrap_err();
        let err = SearchError::InvalidPattern {
            pattern: "[".to_string(),
            source,
        };
        let message = err.to_string();
        assert!(message.starts_with("invalid regular expression \"[\": "));
        assert_eq!(message.lines().count(), 1);
    }
}
