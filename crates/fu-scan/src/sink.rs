//! Destinations for matches and per-entry errors.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use fu_core::EntryWarning;

/// Receives matches as they are found.
///
/// In parallel mode both methods are called concurrently from pool workers,
/// and each call must finish its output before returning.
pub trait MatchSink: Send + Sync {
    /// An entry was accepted by the matcher chain.
    fn on_match(&self, path: &Path);

    /// An entry was skipped because it could not be read.
    fn on_error(&self, _warning: &EntryWarning) {}
}

/// Sink that keeps every match and warning in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    matches: Mutex<Vec<PathBuf>>,
    warnings: Mutex<Vec<EntryWarning>>,
}

impl CollectingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches in the order they were reported.
    pub fn matches(&self) -> Vec<PathBuf> {
        self.matches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Matches sorted, for comparing runs whose order is unspecified.
    pub fn sorted_matches(&self) -> Vec<PathBuf> {
        let mut matches = self.matches();
        matches.sort();
        matches
    }

    /// Warnings in the order they were reported.
    pub fn warnings(&self) -> Vec<EntryWarning> {
        self.warnings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl MatchSink for CollectingSink {
    fn on_match(&self, path: &Path) {
        self.matches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_path_buf());
    }

    fn on_error(&self, warning: &EntryWarning) {
        self.warnings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(warning.clone());
    }
}
