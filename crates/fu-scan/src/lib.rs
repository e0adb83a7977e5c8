//! Filesystem traversal engine for fu.
//!
//! This crate walks search roots using jwalk and runs every entry through a
//! [`MatcherChain`].
//!
//! # Overview
//!
//! - **Sequential traversal** in lexical pre-order on the calling thread
//! - **Parallel traversal** with stat and matching on a rayon pool
//! - **Streaming output** via the [`MatchSink`] trait
//! - **Atomic counters** for visited entries, matches and skipped errors
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use fu_scan::{CollectingSink, Search, SearchConfig};
//!
//! let config = SearchConfig::new("Cargo.toml", "/path/to/search");
//! let search = Search::new(&config).unwrap();
//!
//! let sink = Arc::new(CollectingSink::new());
//! let summary = search.run(sink.clone());
//!
//! for path in sink.matches() {
//!     println!("{}", path.display());
//! }
//! println!("{summary}");
//! ```

mod search;
mod sink;
mod stats;
mod walker;

pub use search::{Search, resolve_roots};
pub use sink::{CollectingSink, MatchSink};
pub use stats::{SearchStats, SearchSummary};
pub use walker::{EntryVisitor, Walker};

// Re-export core types for convenience
pub use fu_core::{
    EntryMeta, EntryWarning, Matcher, MatcherChain, NameMode, RootSet, SearchConfig, SearchError,
    TraversalMode, WarningKind,
};
