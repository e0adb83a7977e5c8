//! Search configuration types.

use std::path::PathBuf;
use std::time::Duration;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Which name matcher a search uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NameMode {
    /// Basename equals the query.
    #[default]
    Exact,
    /// Basename starts with the query.
    Prefix,
    /// Basename ends with the query.
    Suffix,
    /// Basename contains the query.
    Substring,
    /// Query characters appear in order, ignoring case.
    Fuzzy,
    /// Query is a regular expression.
    Regex,
    /// Every entry matches.
    All,
}

/// Raw name-matcher flags as given on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameFlags {
    pub regex: bool,
    pub suffix: bool,
    pub prefix: bool,
    pub fuzzy: bool,
    pub substring: bool,
}

impl NameFlags {
    /// Number of name-matcher flags set.
    pub fn count(&self) -> usize {
        [self.regex, self.suffix, self.prefix, self.fuzzy, self.substring]
            .into_iter()
            .filter(|set| *set)
            .count()
    }
}

impl NameMode {
    /// Pick the name matcher from the command-line flags.
    ///
    /// Several flags may be set at once; the first in the order
    /// regex, suffix, prefix, fuzzy, substring wins. With no flag an empty
    /// query matches everything and any other query is an exact match.
    pub fn from_flags(flags: NameFlags, query: &str) -> Self {
        if flags.count() > 1 {
            tracing::debug!(?flags, "several name matchers requested, using priority order");
        }

        if flags.regex {
            Self::Regex
        } else if flags.suffix {
            Self::Suffix
        } else if flags.prefix {
            Self::Prefix
        } else if flags.fuzzy {
            Self::Fuzzy
        } else if flags.substring {
            Self::Substring
        } else if query.is_empty() {
            Self::All
        } else {
            Self::Exact
        }
    }
}

/// How directories are traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TraversalMode {
    /// One thread, lexical pre-order per root.
    Sequential,
    /// Subtrees are read concurrently on a worker pool.
    #[default]
    Parallel,
}

/// Configuration for a search.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct SearchConfig {
    /// Query text handed to the name matcher.
    #[builder(default)]
    #[serde(default)]
    pub query: String,

    /// Directories to search.
    #[builder(default = "vec![PathBuf::from(\".\")]")]
    #[serde(default = "default_roots")]
    pub roots: Vec<PathBuf>,

    /// Name matcher to use.
    #[builder(default)]
    #[serde(default)]
    pub name_mode: NameMode,

    /// Permission bits of which at least one must be set.
    #[builder(default)]
    #[serde(default)]
    pub permission: Option<u32>,

    /// Only report directories.
    #[builder(default = "false")]
    #[serde(default)]
    pub dirs_only: bool,

    /// Only report entries modified longer ago than this.
    #[builder(default)]
    #[serde(default)]
    pub older_than: Option<Duration>,

    /// Only report entries modified more recently than this.
    #[builder(default)]
    #[serde(default)]
    pub younger_than: Option<Duration>,

    /// Report entries that fail every matcher instead.
    #[builder(default = "false")]
    #[serde(default)]
    pub exclude: bool,

    /// Traversal strategy.
    #[builder(default)]
    #[serde(default)]
    pub traversal: TraversalMode,

    /// Number of worker threads for parallel traversal (0 = auto-detect).
    #[builder(default = "0")]
    #[serde(default)]
    pub threads: usize,
}

fn default_roots() -> Vec<PathBuf> {
    vec![PathBuf::from(".")]
}

impl SearchConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref roots) = self.roots {
            if roots.is_empty() {
                return Err("At least one root path is required".to_string());
            }
            if roots.iter().any(|root| root.as_os_str().is_empty()) {
                return Err("Root path cannot be empty".to_string());
            }
        }
        Ok(())
    }
}

impl SearchConfig {
    /// Create a new search config builder.
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::default()
    }

    /// Create an exact-match config searching the given root.
    pub fn new(query: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            query: query.into(),
            roots: vec![root.into()],
            name_mode: NameMode::Exact,
            permission: None,
            dirs_only: false,
            older_than: None,
            younger_than: None,
            exclude: false,
            traversal: TraversalMode::Parallel,
            threads: 0,
        }
    }

    /// Name mode actually in effect: an empty exact query matches everything.
    pub fn effective_name_mode(&self) -> NameMode {
        match self.name_mode {
            NameMode::Exact if self.query.is_empty() => NameMode::All,
            mode => mode,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new("", ".")
    }
}
