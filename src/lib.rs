//! metaphone-br - Phonetic matching for Brazilian Portuguese personal names
//!
//! Turns each word of a name into a phonetic code with an ordered rewrite
//! rule table, then scores two names by aligning their words on those codes.
//!
//! # Features
//! - Metaphone-style transcription tuned for Brazilian Portuguese spelling
//! - Name similarity tolerant to spelling variants and connective words
//! - Parallel batch deduplication and ranking
//! - Optional Python bindings (`python` feature)
//!
//! # Example
//! ```
//! use metaphone_br::{pack, Name};
//!
//! assert_eq!(pack("LUIZ"), pack("LUIS"));
//!
//! let a = Name::parse("Maria Souza").unwrap();
//! let score = a.sim_string("Maria de Souza").unwrap();
//! assert_eq!(score, 1.0);
//! ```

pub mod algorithms;
pub mod config;
pub mod dedup;
pub mod error;
pub mod name;
pub mod observer;
pub mod scoring;

#[cfg(feature = "python")]
mod python;

pub use algorithms::{
    levenshtein::Levenshtein,
    normalize::normalize_accents,
    phonetic::{pack, pack_match, MetaphoneBr, Transcriber},
    rules::{RuleSet, RuleSpec},
    EditDistance, Similarity,
};
pub use config::MatchConfig;
pub use error::{MetaphoneError, Result};
pub use name::Name;
pub use observer::{NoopObserver, SimObserver, TracingObserver};
pub use scoring::{is_sim, is_sim_with, word_sim, NameMatcher};
