//! Matching configuration
//!
//! A [`MatchConfig`] is built once and handed to a
//! [`NameMatcher`](crate::NameMatcher); it is never mutated afterwards.
//! Every field has a default, so a partial serialized document is enough:
//!
//! ```
//! use metaphone_br::MatchConfig;
//!
//! let config = MatchConfig::default().with_threshold(0.7).with_verbose(false);
//! assert!(config.validate().is_ok());
//! assert!(config.is_preposition("DOS"));
//! ```

use crate::error::{MetaphoneError, Result};
use ahash::AHashSet;
use serde::{Deserialize, Deserializer, Serialize};

/// Default fraction of a phonetic code's length tolerated as edit distance.
pub const DEFAULT_LEV_THRESHOLD: f64 = 0.5;

/// Connective words ignored when weighting name matches.
pub const DEFAULT_PREPOSITIONS: &[&str] = &["DE", "DO", "DA", "DOS", "DAS"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Scales the edit distance tolerated between two phonetic codes.
    pub lev_threshold: f64,
    /// Append phonetic codes when rendering a name.
    pub verbose: bool,
    /// Uppercase connective tokens excluded from the score.
    #[serde(deserialize_with = "deserialize_prepositions")]
    pub prepositions: AHashSet<String>,
}

fn uppercase_all<I, S>(prepositions: I) -> AHashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    prepositions
        .into_iter()
        .map(|p| p.as_ref().to_uppercase())
        .collect()
}

fn deserialize_prepositions<'de, D>(
    deserializer: D,
) -> std::result::Result<AHashSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<String>::deserialize(deserializer).map(uppercase_all)
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            lev_threshold: DEFAULT_LEV_THRESHOLD,
            verbose: true,
            prepositions: DEFAULT_PREPOSITIONS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl MatchConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_threshold(mut self, lev_threshold: f64) -> Self {
        self.lev_threshold = lev_threshold;
        self
    }

    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Replace the preposition set. Entries are uppercased to match tokens.
    #[must_use]
    pub fn with_prepositions<I, S>(mut self, prepositions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.prepositions = uppercase_all(prepositions);
        self
    }

    /// Uppercase entries inserted directly into `prepositions`.
    #[must_use]
    pub(crate) fn normalized(mut self) -> Self {
        if self.prepositions.iter().any(|p| p.to_uppercase() != *p) {
            self.prepositions = uppercase_all(&self.prepositions);
        }
        self
    }

    /// Check the threshold is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.lev_threshold.is_finite() || self.lev_threshold < 0.0 {
            return Err(MetaphoneError::InvalidThreshold(self.lev_threshold));
        }
        Ok(())
    }

    #[inline]
    pub fn is_preposition(&self, word: &str) -> bool {
        self.prepositions.contains(word)
    }
}
