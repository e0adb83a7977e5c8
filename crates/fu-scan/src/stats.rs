//! Traversal counters.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Counters shared by every traversal worker.
///
/// `found` is only incremented after `traversed` for the same entry, and
/// [`SearchStats::summary`] loads `found` before `traversed`, so a summary
/// never reports more matches than visited entries.
#[derive(Debug, Default)]
pub struct SearchStats {
    traversed: AtomicU64,
    found: AtomicU64,
    errors: AtomicU64,
}

impl SearchStats {
    /// Create zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an entry whose metadata was read.
    pub fn record_visit(&self) {
        self.traversed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an accepted entry. Must follow `record_visit` for that entry.
    pub fn record_match(&self) {
        self.found.fetch_add(1, Ordering::Release);
    }

    /// Record a skipped entry.
    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Entries visited so far.
    pub fn traversed(&self) -> u64 {
        self.traversed.load(Ordering::Relaxed)
    }

    /// Matches reported so far.
    pub fn found(&self) -> u64 {
        self.found.load(Ordering::Acquire)
    }

    /// Entries skipped because of errors so far.
    pub fn errors(&self) -> u64 {
        self.errors.load(Ordering::Relaxed)
    }

    /// Snapshot the counters.
    pub fn summary(&self, elapsed: Duration) -> SearchSummary {
        let found = self.found();
        let traversed = self.traversed();
        SearchSummary {
            traversed,
            found,
            errors: self.errors(),
            elapsed,
        }
    }
}

/// Totals for a finished (or in-progress) search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSummary {
    /// Entries visited.
    pub traversed: u64,
    /// Entries reported.
    pub found: u64,
    /// Entries skipped because of errors.
    pub errors: u64,
    /// Wall time spent walking.
    pub elapsed: Duration,
}

impl fmt::Display for SearchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Traversed {} files in {:?}, found {} matches.",
            self.traversed, self.elapsed, self.found
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_counters() {
        let stats = SearchStats::new();
        stats.record_visit();
        stats.record_visit();
        stats.record_match();
        stats.record_error();

        let summary = stats.summary(Duration::from_millis(3));
        assert_eq!(summary.traversed, 2);
        assert_eq!(summary.found, 1);
        assert_eq!(summary.errors, 1);
    }

    #[test]
    fn test_concurrent_increments_are_not_lost() {
        let stats = Arc::new(SearchStats::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let stats = Arc::clone(&stats);
                thread::spawn(move || {
                    for i in 0..10_000 {
                        stats.record_visit();
                        if i % 2 == 0 {
                            stats.record_match();
                        }
                        let snapshot = stats.summary(Duration::ZERO);
                        assert!(snapshot.found <= snapshot.traversed);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(stats.traversed(), 80_000);
        assert_eq!(stats.found(), 40_000);
    }

    #[test]
    fn test_summary_display() {
        let summary = SearchSummary {
            traversed: 120,
            found: 3,
            errors: 0,
            elapsed: Duration::from_millis(15),
        };
        assert_eq!(
            summary.to_string(),
            "Traversed 120 files in 15ms, found 3 matches."
        );
    }
}
