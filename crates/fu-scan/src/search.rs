//! A configured search over a set of roots.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use fu_core::{MatcherChain, RootSet, SearchConfig, SearchError};

use crate::sink::MatchSink;
use crate::stats::{SearchStats, SearchSummary};
use crate::walker::{EntryVisitor, Walker};

/// Everything needed to run a search, validated up front.
///
/// Construction fails on an invalid pattern or a root that cannot be
/// resolved; running never fails.
#[derive(Debug, Clone)]
pub struct Search {
    roots: RootSet,
    chain: Arc<MatcherChain>,
    walker: Walker,
}

impl Search {
    /// Build a search from configuration.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let chain = MatcherChain::from_config(config)?;
        let roots = resolve_roots(&config.roots)?;

        Ok(Self {
            roots,
            chain: Arc::new(chain),
            walker: Walker::from_config(config),
        })
    }

    /// Deduplicated roots, in traversal order.
    pub fn roots(&self) -> &RootSet {
        &self.roots
    }

    /// The matcher chain applied to every entry.
    pub fn chain(&self) -> &MatcherChain {
        &self.chain
    }

    /// Walk every root, streaming matches to `sink`.
    pub fn run(&self, sink: Arc<dyn MatchSink>) -> SearchSummary {
        let start = Instant::now();
        let visitor = EntryVisitor::new(Arc::clone(&self.chain), Arc::new(SearchStats::new()), sink);

        for root in self.roots.paths() {
            self.walker.walk(&root, &visitor);
        }

        let summary = visitor.stats().summary(start.elapsed());
        tracing::debug!(
            traversed = summary.traversed,
            found = summary.found,
            errors = summary.errors,
            "search finished"
        );
        summary
    }
}

/// Resolve user-supplied directories into a deduplicated root set.
///
/// Roots are made absolute and cleaned lexically; symbolic links are kept
/// as spelled, so reported paths start with what the user typed.
pub fn resolve_roots(paths: &[PathBuf]) -> Result<RootSet, SearchError> {
    let mut roots = RootSet::new();
    for path in paths {
        let absolute = resolve_dir(path)?;
        roots.insert_path(&absolute);
    }
    if roots.is_empty() {
        return Err(SearchError::InvalidConfig {
            message: "At least one root path is required".to_string(),
        });
    }
    tracing::debug!(roots = ?roots.prefixes(), "resolved search roots");
    Ok(roots)
}

fn resolve_dir(path: &Path) -> Result<PathBuf, SearchError> {
    let absolute = std::path::absolute(path)
        .map(|p| clean(&p))
        .map_err(|e| SearchError::unresolvable(path, e))?;
    let metadata = fs::metadata(&absolute).map_err(|e| SearchError::unresolvable(path, e))?;
    if !metadata.is_dir() {
        return Err(SearchError::NotADirectory { path: absolute });
    }
    Ok(absolute)
}

/// Drop `.` components and fold `..` into its parent without touching the
/// filesystem. `..` above the root stays at the root.
fn clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                cleaned.pop();
            }
            other => cleaned.push(other),
        }
    }
    cleaned
}
