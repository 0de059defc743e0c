//! Tokenized names
//!
//! A [`Name`] keeps the uppercase letter runs of a raw string in their
//! original order, alongside the phonetic code of each one.

use crate::algorithms::phonetic::Transcriber;
use crate::config::MatchConfig;
use crate::error::{MetaphoneError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{L}+").expect("word pattern is valid"));

/// A tokenized personal name.
///
/// `words()[i]` and `codes()[i]` always describe the same token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawName", into = "RawName")]
pub struct Name {
    words: Vec<String>,
    codes: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct RawName {
    words: Vec<String>,
    codes: Vec<String>,
}

impl TryFrom<RawName> for Name {
    type Error = MetaphoneError;

    fn try_from(raw: RawName) -> Result<Self> {
        Name::from_parts(raw.words, raw.codes)
    }
}

impl From<Name> for RawName {
    fn from(name: Name) -> Self {
        RawName {
            words: name.words,
            codes: name.codes,
        }
    }
}

impl Name {
    /// Tokenize and transcribe with the built-in Portuguese rules.
    ///
    /// # Examples
    /// ```
    /// use metaphone_br::Name;
    ///
    /// let name = Name::parse("Maria de Souza").unwrap();
    /// assert_eq!(name.words(), ["MARIA", "DE", "SOUZA"]);
    /// assert!(Name::parse("123 - 456").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        Self::parse_with(raw, &Transcriber::default())
    }

    /// Tokenize `raw` into maximal letter runs and transcribe each one.
    ///
    /// Fails with [`MetaphoneError::InvalidName`] when there is no letter at all.
    pub fn parse_with(raw: &str, transcriber: &Transcriber<'_>) -> Result<Self> {
        let upper = raw.to_uppercase();
        let words: Vec<String> = WORD_RE
            .find_iter(&upper)
            .map(|m| m.as_str().to_string())
            .collect();

        if words.is_empty() {
            return Err(MetaphoneError::InvalidName(raw.to_string()));
        }

        let codes = words.iter().map(|w| transcriber.pack(w)).collect();
        Ok(Self { words, codes })
    }

    /// Assemble a name from already computed parts.
    pub fn from_parts(words: Vec<String>, codes: Vec<String>) -> Result<Self> {
        if words.len() != codes.len() {
            return Err(MetaphoneError::InvalidName(format!(
                "{} words but {} codes",
                words.len(),
                codes.len()
            )));
        }
        Ok(Self { words, codes })
    }

    #[inline]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Phonetic code of each word
    #[inline]
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// `(word, code)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.words
            .iter()
            .zip(&self.codes)
            .map(|(w, c)| (w.as_str(), c.as_str()))
    }

    /// Whether the word at `index` is one of the configured prepositions.
    #[inline]
    pub fn is_preposition(&self, index: usize, config: &MatchConfig) -> bool {
        self.words.get(index).is_some_and(|w| config.is_preposition(w))
    }

    /// Codes joined by a space, used as a blocking key
    pub fn phonetic_key(&self) -> String {
        self.codes.join(" ")
    }

    /// Words joined by a space, followed by the codes in parentheses when `verbose`.
    pub fn render(&self, verbose: bool) -> String {
        let mut s = self.words.join(" ");
        if verbose {
            s.push_str(" (");
            s.push_str(&self.codes.join(" "));
            s.push(')');
        }
        s
    }
}

/// Always renders the codes; use [`NameMatcher::render`](crate::NameMatcher::render)
/// to honor [`MatchConfig::verbose`].
impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(true))
    }
}
