//! Core types and predicates for fu.
//!
//! This crate holds everything that decides *what* a search reports,
//! independent of how the filesystem is walked: the search configuration,
//! the root set that removes overlapping search directories, entry metadata,
//! and the matchers combined into a [`MatcherChain`].

mod chain;
mod config;
mod entry;
mod error;
mod matcher;
mod parse;
mod roots;

pub use chain::MatcherChain;
pub use config::{NameFlags, NameMode, SearchConfig, SearchConfigBuilder, TraversalMode};
pub use entry::EntryMeta;
pub use error::{EntryWarning, SearchError, WarningKind};
pub use matcher::Matcher;
pub use parse::{parse_duration, parse_permission};
pub use roots::RootSet;
