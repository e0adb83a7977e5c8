//! Ordered composition of matchers with a global polarity.

use crate::config::{NameMode, SearchConfig};
use crate::entry::EntryMeta;
use crate::error::SearchError;
use crate::matcher::Matcher;

/// One name matcher followed by any stackable matchers.
///
/// An entry is accepted when every matcher's verdict differs from
/// `exclude`. With `exclude` set, an entry is therefore accepted only if
/// *every* matcher rejects it, which is not the negation of the plain
/// conjunction.
#[derive(Debug, Clone)]
pub struct MatcherChain {
    matchers: Vec<Matcher>,
    exclude: bool,
}

impl MatcherChain {
    /// Create a chain from explicit matchers.
    pub fn new(matchers: Vec<Matcher>, exclude: bool) -> Self {
        Self { matchers, exclude }
    }

    /// Build the chain described by a search configuration.
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        let query = config.query.as_str();
        let name = match config.effective_name_mode() {
            NameMode::Exact => Matcher::exact(query),
            NameMode::Prefix => Matcher::prefix(query),
            NameMode::Suffix => Matcher::suffix(query),
            NameMode::Substring => Matcher::substring(query),
            NameMode::Fuzzy => Matcher::fuzzy(query),
            NameMode::Regex => Matcher::regex(query)?,
            NameMode::All => Matcher::All,
        };

        let mut matchers = Vec::with_capacity(5);
        matchers.push(name);

        if let Some(mask) = config.permission.filter(|&m| m != 0) {
            matchers.push(Matcher::Permission(mask));
        }
        if config.dirs_only {
            matchers.push(Matcher::DirectoryOnly);
        }
        if let Some(age) = config.older_than.filter(|d| !d.is_zero()) {
            matchers.push(Matcher::OlderThan(age));
        }
        if let Some(age) = config.younger_than.filter(|d| !d.is_zero()) {
            matchers.push(Matcher::YoungerThan(age));
        }

        let chain = Self::new(matchers, config.exclude);
        tracing::debug!(chain = %chain, "built matcher chain");
        Ok(chain)
    }

    /// Whether the entry is reported.
    pub fn accepts(&self, entry: &EntryMeta) -> bool {
        self.matchers.iter().all(|m| m.is_match(entry) != self.exclude)
    }

    /// The matchers in evaluation order.
    pub fn matchers(&self) -> &[Matcher] {
        &self.matchers
    }

    /// Whether the polarity is inverted.
    pub fn is_exclude(&self) -> bool {
        self.exclude
    }
}

impl std::fmt::Display for MatcherChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.exclude {
            f.write_str("exclude ")?;
        }
        for (i, matcher) in self.matchers.iter().enumerate() {
            if i > 0 {
                f.write_str(" && ")?;
            }
            write!(f, "{matcher}")?;
        }
        Ok(())
    }
}
