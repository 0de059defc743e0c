//! Phonetic transcription for Brazilian Portuguese
//!
//! Turns a single word into a code that stays the same across common
//! spelling variants of the same pronunciation ("LUIZ"/"LUIS",
//! "THIAGO"/"TIAGO"). The transcriber walks the accent-normalized word with a
//! cursor and, at every position, fires the first rule of the table whose
//! pattern matches the text starting at `cursor + context_offset`.
//!
//! # Fallback
//! Some words only trigger rules that emit nothing (silent letters, inner
//! vowels). Their code falls back to the uppercased word with its vowels
//! removed, so every non-empty word gets a non-empty code.

use super::levenshtein::levenshtein_similarity;
use super::normalize::normalize_accents;
use super::rules::RuleSet;
use super::Similarity;
use smallvec::SmallVec;

/// Applies an ordered rule table to words.
///
/// Cheap to copy; it only borrows the rule table.
#[derive(Debug, Clone, Copy)]
pub struct Transcriber<'r> {
    rules: &'r RuleSet,
}

impl Default for Transcriber<'static> {
    fn default() -> Self {
        Self::new(RuleSet::portuguese())
    }
}

impl<'r> Transcriber<'r> {
    #[must_use]
    pub fn new(rules: &'r RuleSet) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &'r RuleSet {
        self.rules
    }

    /// Transcribe a word into its phonetic code.
    ///
    /// Deterministic and total: each step advances the cursor by at least one
    /// character, so the loop always terminates.
    #[must_use]
    pub fn pack(&self, word: &str) -> String {
        let normalized = normalize_accents(word);
        // Byte offset of every char, so the cursor can move in characters
        let offsets: SmallVec<[usize; 32]> = normalized.char_indices().map(|(b, _)| b).collect();
        let len = offsets.len();

        let mut code = String::with_capacity(len);
        let mut cursor = 0;

        while cursor < len {
            let mut step = 1;

            for rule in self.rules {
                if !rule.applies_at(cursor) {
                    continue;
                }
                let Some(start) = rule.window_start(cursor) else {
                    continue;
                };
                let window = match offsets.get(start) {
                    Some(&byte) => &normalized[byte..],
                    None if start == len => "",
                    None => continue,
                };

                if rule.is_match(window) {
                    code.push_str(rule.emission());
                    step = rule.consume_length();
                    break;
                }
            }

            cursor += step;
        }

        if code.is_empty() {
            code = strip_vowels(&normalized).to_uppercase();
        }

        code
    }
}

/// Removes ASCII vowels in either case.
fn strip_vowels(s: &str) -> String {
    s.chars().filter(|&c| !is_vowel(c)).collect()
}

#[inline]
fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Transcribe a word with the built-in Portuguese rule table.
///
/// # Examples
/// ```
/// use metaphone_br::algorithms::phonetic::pack;
/// assert_eq!(pack("LUIZ"), pack("LUIS"));
/// assert_eq!(pack("H"), "H");
/// ```
#[must_use]
pub fn pack(word: &str) -> String {
    Transcriber::default().pack(word)
}

/// Check if two words share the same phonetic code.
#[must_use]
pub fn pack_match(a: &str, b: &str) -> bool {
    pack(a) == pack(b)
}

/// Metaphone-BR encoder as a string similarity metric.
///
/// Identical codes score 1.0; otherwise the codes are compared by
/// normalized Levenshtein similarity.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetaphoneBr;

impl MetaphoneBr {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Encode a word to its code
    #[must_use]
    pub fn encode(&self, s: &str) -> String {
        pack(s)
    }
}

impl Similarity for MetaphoneBr {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        let code_a = pack(a);
        let code_b = pack(b);

        if code_a.is_empty() || code_b.is_empty() {
            return 0.0;
        }
        if code_a == code_b {
            return 1.0;
        }
        levenshtein_similarity(&code_a, &code_b)
    }

    fn name(&self) -> &'static str {
        "metaphone_br"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::rules::{RuleSet, RuleSpec};

    #[test]
    fn test_pack_known_codes() {
        assert_eq!(pack("MARIA"), "MR");
        assert_eq!(pack("SOUZA"), "SZ");
        assert_eq!(pack("SILVA"), "SV");
        assert_eq!(pack("JOAO"), "J");
        assert_eq!(pack("CHRISTINA"), "KRST");
        assert_eq!(pack("CARVALHO"), "KRV1");
        assert_eq!(pack("RODRIGUES"), "2DRGS");
    }

    #[test]
    fn test_pack_spelling_variants_agree() {
        assert_eq!(pack("LUIZ"), pack("LUIS"));
        assert_eq!(pack("THIAGO"), pack("TIAGO"));
        assert_eq!(pack("FELIPE"), pack("PHELIPE"));
        assert_eq!(pack("KATIA"), pack("CATIA"));
        assert_eq!(pack("WALTER"), pack("VALTER"));
        assert_eq!(pack("XAVIER"), pack("CHAVIER"));
        assert_eq!(pack("RAFAEL"), pack("RAPHAEL"));
    }

    #[test]
    fn test_pack_accents_neutralized() {
        assert_eq!(pack("JOÃO"), pack("JOAO"));
        assert_eq!(pack("CONCEIÇÃO"), pack("CONCEISSAO"));
        assert_eq!(pack("José"), pack("JOSE"));
    }

    #[test]
    fn test_pack_case_insensitive() {
        assert_eq!(pack("maria"), pack("MARIA"));
        assert_eq!(pack("SoUzA"), pack("SOUZA"));
    }

    #[test]
    fn test_pack_fallback_strips_vowels() {
        // "h" is silent and emits nothing
        assert_eq!(pack("H"), "H");
        assert_eq!(pack("LE"), "L");
        assert_eq!(pack("NE"), "N");
    }

    #[test]
    fn test_pack_empty() {
        assert_eq!(pack(""), "");
    }

    #[test]
    fn test_pack_never_empty_for_letters() {
        for word in ["A", "E", "H", "N", "IE", "LE", "UE", "NN", "HH"] {
            assert!(!pack(word).is_empty(), "empty code for {word}");
        }
    }

    #[test]
    fn test_pack_non_ascii_letters_do_not_panic() {
        // Uppercase Ñ is outside the accent table and stays multi-byte
        assert_eq!(pack("PEÑA"), "P");
        assert!(!pack("Ωμέγα").is_empty());
    }

    #[test]
    fn test_custom_rule_set() {
        const RULES: &[RuleSpec] = &[
            RuleSpec {
                pattern: "ph",
                emission: "F",
                context_offset: 0,
                consume_length: 2,
                first_only: false,
            },
            RuleSpec {
                pattern: "[a-z]",
                emission: "*",
                context_offset: 0,
                consume_length: 1,
                first_only: false,
            },
        ];
        let rules = RuleSet::compile(RULES).unwrap();
        let t = Transcriber::new(&rules);
        assert_eq!(t.pack("phil"), "F**");
    }

    #[test]
    fn test_metaphone_br_similarity() {
        let m = MetaphoneBr::new();
        assert_eq!(m.similarity("LUIZ", "LUIS"), 1.0);
        // "SZ" vs "SS"
        assert_eq!(m.similarity("SOUZA", "SOUSA"), 0.5);
        assert_eq!(m.name(), "metaphone_br");
        assert_eq!(m.encode("SOUSA"), "SS");
    }
}
