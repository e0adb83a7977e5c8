//! JWalk-based directory traversal.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use jwalk::{Parallelism, WalkDir};

use fu_core::{EntryMeta, EntryWarning, MatcherChain, SearchConfig, TraversalMode, WarningKind};

use crate::sink::MatchSink;
use crate::stats::SearchStats;

type DirEntry = jwalk::DirEntry<((), ())>;

/// Walks a root and hands every entry to an [`EntryVisitor`].
///
/// Hidden entries are included and symbolic links are reported as links,
/// never followed.
#[derive(Debug, Clone, Copy)]
pub struct Walker {
    mode: TraversalMode,
    threads: usize,
}

impl Walker {
    /// Create a walker. `threads` only applies to parallel mode (0 = auto-detect).
    pub fn new(mode: TraversalMode, threads: usize) -> Self {
        Self { mode, threads }
    }

    /// Create a walker from search configuration.
    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.traversal, config.threads)
    }

    /// Visit every entry under `root`, including `root` itself.
    ///
    /// Per-entry errors are passed to the visitor and never stop the walk.
    pub fn walk(&self, root: &Path, visitor: &EntryVisitor) {
        match self.mode {
            TraversalMode::Sequential => self.walk_sequential(root, visitor),
            TraversalMode::Parallel => self.walk_parallel(root, visitor),
        }
    }

    /// Lexical pre-order on the calling thread.
    fn walk_sequential(&self, root: &Path, visitor: &EntryVisitor) {
        let walker = base_walker(root)
            .parallelism(Parallelism::Serial)
            .sort(true);

        for entry_result in walker {
            match entry_result {
                Ok(entry) => {
                    visitor.visit(&entry);
                    visitor.check_read_children(&entry);
                }
                Err(err) => visitor.skip(warning_from(&err, WarningKind::ReadError)),
            }
        }
    }

    /// Entries are visited on the pool workers as each directory is read.
    fn walk_parallel(&self, root: &Path, visitor: &EntryVisitor) {
        let parallelism = match self.threads {
            0 => Parallelism::RayonDefaultPool {
                busy_timeout: Duration::from_secs(1),
            },
            n => Parallelism::RayonNewPool(n),
        };
        tracing::debug!(
            root = %root.display(),
            threads = if self.threads == 0 { rayon::current_num_threads() } else { self.threads },
            "parallel walk"
        );

        let worker = visitor.clone();
        let walker = base_walker(root)
            .parallelism(parallelism)
            .process_read_dir(move |_depth, _path, _state, children| {
                // Failed children surface through the iterator below.
                for entry in children.iter().flatten() {
                    worker.visit(entry);
                }
            });

        // Drain the iterator to drive the walk and collect errors.
        for entry_result in walker {
            match entry_result {
                Ok(entry) => visitor.check_read_children(&entry),
                Err(err) => visitor.skip(warning_from(&err, WarningKind::ReadError)),
            }
        }
    }
}

impl Default for Walker {
    fn default() -> Self {
        Self::new(TraversalMode::Parallel, 0)
    }
}

fn base_walker(root: &Path) -> WalkDir {
    WalkDir::new(root)
        .skip_hidden(false)
        .follow_links(false)
        .min_depth(0)
}

/// Per-entry processing shared by every worker: stat, match, report, count.
#[derive(Clone)]
pub struct EntryVisitor {
    chain: Arc<MatcherChain>,
    stats: Arc<SearchStats>,
    sink: Arc<dyn MatchSink>,
}

impl EntryVisitor {
    /// Create a visitor reporting to `sink` and counting into `stats`.
    pub fn new(chain: Arc<MatcherChain>, stats: Arc<SearchStats>, sink: Arc<dyn MatchSink>) -> Self {
        Self { chain, stats, sink }
    }

    /// Counters updated by this visitor.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    fn visit(&self, entry: &DirEntry) {
        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(err) => {
                self.skip(warning_from(&err, WarningKind::MetadataError));
                return;
            }
        };
        self.stats.record_visit();

        let meta = EntryMeta::from_metadata(entry.file_name(), &metadata);
        if self.chain.accepts(&meta) {
            self.sink.on_match(&entry.path());
            self.stats.record_match();
        }
    }

    /// Report a directory whose contents could not be listed.
    fn check_read_children(&self, entry: &DirEntry) {
        if let Some(err) = &entry.read_children_error {
            self.skip(warning_from(err, WarningKind::ReadError));
        }
    }

    fn skip(&self, warning: EntryWarning) {
        tracing::debug!(path = %warning.path.display(), kind = ?warning.kind, "skipping entry");
        self.stats.record_error();
        self.sink.on_error(&warning);
    }
}

impl std::fmt::Debug for EntryVisitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryVisitor")
            .field("chain", &self.chain)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

fn warning_from(err: &jwalk::Error, fallback: WarningKind) -> EntryWarning {
    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
    match err.io_error() {
        Some(io) => EntryWarning::from_io(path, io, fallback),
        None => EntryWarning::new(path, err.to_string(), fallback),
    }
}
