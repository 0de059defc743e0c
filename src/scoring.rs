//! Name similarity scoring
//!
//! Two names are aligned greedily, left to right: each word of the left name
//! is paired with the first not-yet-passed word of the right name whose
//! phonetic code is equal or close enough ([`is_sim`]). Paired words
//! contribute their literal similarity ([`word_sim`]) as a product, and the
//! number of pairs is weighted against the total word count:
//!
//! ```text
//! score = Π word_sim(pair) * 2 * pairs / (len1 + len2 - prepositions)
//! ```
//!
//! The alignment never goes back in the right name, so reordered names
//! ("SILVA MARIA" vs "MARIA SILVA") lose the words that come out of order.

use crate::algorithms::levenshtein::{levenshtein, levenshtein_distance_bounded};
use crate::algorithms::phonetic::Transcriber;
use crate::algorithms::rules::RuleSet;
use crate::algorithms::Similarity;
use crate::config::{MatchConfig, DEFAULT_LEV_THRESHOLD};
use crate::error::{MetaphoneError, Result};
use crate::name::Name;
use crate::observer::{MatchEvent, NoopObserver, ScoreEvent, Side, SimObserver};
use once_cell::sync::Lazy;

static DEFAULT_MATCHER: Lazy<NameMatcher<'static>> = Lazy::new(NameMatcher::default);

/// Edit distance tolerated between two codes for a given threshold.
///
/// `max(1, floor(threshold * (min(len1, len2) - 1)))`
#[inline]
#[must_use]
pub fn similarity_margin(code1: &str, code2: &str, lev_threshold: f64) -> usize {
    let shorter = code1.chars().count().min(code2.chars().count());
    let scaled = (lev_threshold * shorter.saturating_sub(1) as f64).floor();
    // `as` saturates for out-of-range floats
    (scaled as usize).max(1)
}

/// Whether two phonetic codes are equivalent under `lev_threshold`.
#[must_use]
pub fn is_sim_with(code1: &str, code2: &str, lev_threshold: f64) -> bool {
    let margin = similarity_margin(code1, code2, lev_threshold);
    levenshtein_distance_bounded(code1, code2, Some(margin)).is_some()
}

/// Whether two phonetic codes are equivalent under the default threshold.
///
/// # Examples
/// ```
/// use metaphone_br::is_sim;
/// assert!(is_sim("SZ", "SS"));
/// assert!(!is_sim("MR", "SV"));
/// ```
#[must_use]
pub fn is_sim(code1: &str, code2: &str) -> bool {
    is_sim_with(code1, code2, DEFAULT_LEV_THRESHOLD)
}

/// Literal similarity of two words: `1 - distance / max(len1, len2)`.
///
/// Symmetric, in `[0, 1]`, and 1.0 only for equal words.
#[must_use]
pub fn word_sim(w1: &str, w2: &str) -> f64 {
    let max_len = w1.chars().count().max(w2.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(w1, w2) as f64 / max_len as f64
}

/// Scores names against each other under a fixed configuration.
///
/// Holds no mutable state, so one matcher can be shared across threads.
#[derive(Debug, Clone)]
pub struct NameMatcher<'r, O = NoopObserver> {
    config: MatchConfig,
    transcriber: Transcriber<'r>,
    observer: O,
}

impl Default for NameMatcher<'static> {
    fn default() -> Self {
        Self {
            config: MatchConfig::default(),
            transcriber: Transcriber::default(),
            observer: NoopObserver,
        }
    }
}

impl NameMatcher<'static> {
    /// Build a matcher over the built-in Portuguese rules.
    pub fn new(config: MatchConfig) -> Result<Self> {
        Self::with_rules(config, RuleSet::portuguese())
    }
}

impl<'r> NameMatcher<'r> {
    /// Build a matcher over a custom rule table.
    pub fn with_rules(config: MatchConfig, rules: &'r RuleSet) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: config.normalized(),
            transcriber: Transcriber::new(rules),
            observer: NoopObserver,
        })
    }
}

impl<'r, O: SimObserver> NameMatcher<'r, O> {
    /// Swap in an observer for alignment decisions.
    #[must_use]
    pub fn with_observer<P: SimObserver>(self, observer: P) -> NameMatcher<'r, P> {
        NameMatcher {
            config: self.config,
            transcriber: self.transcriber,
            observer,
        }
    }

    #[inline]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[inline]
    pub fn transcriber(&self) -> &Transcriber<'r> {
        &self.transcriber
    }

    #[inline]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Parse a raw name with this matcher's rule table.
    pub fn parse(&self, raw: &str) -> Result<Name> {
        Name::parse_with(raw, &self.transcriber)
    }

    /// Render a name, appending its codes if the configuration is verbose.
    pub fn render(&self, name: &Name) -> String {
        name.render(self.config.verbose)
    }

    #[inline]
    pub fn is_sim(&self, code1: &str, code2: &str) -> bool {
        is_sim_with(code1, code2, self.config.lev_threshold)
    }

    #[inline]
    pub fn word_sim(&self, w1: &str, w2: &str) -> f64 {
        word_sim(w1, w2)
    }

    /// Score how likely two names refer to the same person.
    ///
    /// Returns a value in `[0, 1]`, or [`MetaphoneError::UndefinedSimilarity`]
    /// when no word is left to weigh.
    pub fn sim(&self, left: &Name, right: &Name) -> Result<f64> {
        let mut pos = 0;
        let mut product = 1.0;
        let mut matches = 0usize;
        let mut prepositions = 0usize;

        for (i, (word, code)) in left.iter().enumerate() {
            if left.is_preposition(i, &self.config) {
                prepositions += 1;
                self.observer.on_preposition(Side::Left, i, word);
                continue;
            }

            // Right-side prepositions passed over count only if this scan ends in a match
            let mut skipped = 0;
            let mut candidate = None;
            for (j, (_, other_code)) in right.iter().enumerate().skip(pos) {
                if right.is_preposition(j, &self.config) {
                    skipped += 1;
                    continue;
                }
                if code == other_code || self.is_sim(code, other_code) {
                    candidate = Some(j);
                    break;
                }
            }

            // A candidate sharing no letters with the word is not a match
            let aligned = candidate
                .map(|j| (j, word_sim(word, &right.words()[j])))
                .filter(|&(_, similarity)| similarity > 0.0);

            let Some((j, similarity)) = aligned else {
                self.observer.on_no_match(i, word);
                continue;
            };

            for (k, other_word) in right.words().iter().enumerate().take(j).skip(pos) {
                if self.config.is_preposition(other_word) {
                    self.observer.on_preposition(Side::Right, k, other_word);
                }
            }
            self.observer.on_match(&MatchEvent {
                left_index: i,
                right_index: j,
                left_word: word,
                right_word: &right.words()[j],
                similarity,
                position: pos,
                skipped_prepositions: skipped,
            });

            product *= similarity;
            matches += 1;
            prepositions += skipped;
            pos = j + 1;
        }

        let undefined = || MetaphoneError::UndefinedSimilarity {
            len1: left.len(),
            len2: right.len(),
            prepositions,
        };
        let denominator = (left.len() + right.len())
            .checked_sub(prepositions)
            .filter(|&d| d > 0)
            .ok_or_else(undefined)?;

        let score = product * (2 * matches) as f64 / denominator as f64;
        self.observer.on_score(&ScoreEvent {
            matches,
            left_len: left.len(),
            right_len: right.len(),
            prepositions,
            score,
        });
        Ok(score)
    }

    /// [`sim`](Self::sim) against a raw name, parsed with this matcher's rules.
    pub fn sim_str(&self, left: &Name, right: &str) -> Result<f64> {
        let right = self.parse(right)?;
        self.sim(left, &right)
    }

    /// Parse both names and score them.
    pub fn sim_raw(&self, left: &str, right: &str) -> Result<f64> {
        let left = self.parse(left)?;
        self.sim_str(&left, right)
    }
}

/// Raw-string similarity; names that fail to parse score 0.0.
impl<'r, O: SimObserver> Similarity for NameMatcher<'r, O> {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        self.sim_raw(a, b).unwrap_or(0.0)
    }

    fn name(&self) -> &'static str {
        "metaphone_br_name"
    }
}

impl Name {
    /// Score against another name with the default configuration.
    ///
    /// # Examples
    /// ```
    /// use metaphone_br::Name;
    ///
    /// let a = Name::parse("Maria Souza").unwrap();
    /// let b = Name::parse("Maria de Souza").unwrap();
    /// assert_eq!(a.sim(&b).unwrap(), 1.0);
    /// ```
    pub fn sim(&self, other: &Name) -> Result<f64> {
        DEFAULT_MATCHER.sim(self, other)
    }

    /// Score against a raw name with the default configuration.
    pub fn sim_string(&self, other: &str) -> Result<f64> {
        DEFAULT_MATCHER.sim_str(self, other)
    }
}
