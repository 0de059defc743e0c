//! Accent normalization
//!
//! Collapses Portuguese diacritics to their base Latin letters before
//! phonetic transcription. The substitution table is fixed linguistic data:
//! every accented vowel maps to its lowercase base letter, and the cedilla
//! expands to the digraph `ss`.

use ahash::AHashMap;
use once_cell::sync::Lazy;

/// Accent substitution table, in its canonical order.
///
/// All keys are single characters, so the order does not affect the result.
pub const ACCENT_TABLE: &[(char, &str)] = &[
    ('ç', "ss"),
    ('Ç', "ss"),
    ('á', "a"),
    ('é', "e"),
    ('í', "i"),
    ('ó', "o"),
    ('ú', "u"),
    ('Á', "a"),
    ('É', "e"),
    ('Í', "i"),
    ('Ó', "o"),
    ('Ú', "u"),
    ('ã', "a"),
    ('ẽ', "e"),
    ('ĩ', "i"),
    ('õ', "o"),
    ('ũ', "u"),
    ('Ã', "a"),
    ('Ẽ', "e"),
    ('Ĩ', "i"),
    ('Õ', "o"),
    ('Ũ', "u"),
    ('â', "a"),
    ('ê', "e"),
    ('î', "i"),
    ('ô', "o"),
    ('û', "u"),
    ('Â', "a"),
    ('Ê', "e"),
    ('Î', "i"),
    ('Ô', "o"),
    ('Û', "u"),
    ('à', "a"),
    ('è', "e"),
    ('ì', "i"),
    ('ò', "o"),
    ('ù', "u"),
    ('À', "a"),
    ('È', "e"),
    ('Ì', "i"),
    ('Ò', "o"),
    ('Ù', "u"),
    ('ä', "a"),
    ('ë', "e"),
    ('ï', "i"),
    ('ö', "o"),
    ('ü', "u"),
    ('Ä', "a"),
    ('Ë', "e"),
    ('Ï', "i"),
    ('Ö', "o"),
    ('Ü', "u"),
    ('ý', "y"),
    ('ỳ', "y"),
    ('ỹ', "y"),
    ('ŷ', "y"),
    ('ÿ', "y"),
    ('ñ', "n"),
];

static ACCENT_MAP: Lazy<AHashMap<char, &'static str>> =
    Lazy::new(|| ACCENT_TABLE.iter().copied().collect());

/// Replace every accented character with its base-Latin equivalent.
///
/// Characters outside the table pass through unchanged. The output is never
/// shorter than the input and only grows for `ç`/`Ç`.
///
/// # Examples
/// ```
/// use metaphone_br::algorithms::normalize::normalize_accents;
/// assert_eq!(normalize_accents("JOÃO"), "JOaO");
/// assert_eq!(normalize_accents("Conceição"), "Conceissao");
/// ```
#[must_use]
pub fn normalize_accents(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match ACCENT_MAP.get(&c) {
            Some(replacement) => out.push_str(replacement),
            None => out.push(c),
        }
    }
    out
}

/// Returns true if `s` contains no character from the accent table.
#[inline]
#[must_use]
pub fn is_normalized(s: &str) -> bool {
    !s.chars().any(|c| ACCENT_MAP.contains_key(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_ascii_passes_through() {
        assert_eq!(normalize_accents("MARIA SOUZA"), "MARIA SOUZA");
        assert_eq!(normalize_accents(""), "");
    }

    #[test]
    fn test_accents_collapse_to_lowercase_base() {
        assert_eq!(normalize_accents("José"), "Jose");
        assert_eq!(normalize_accents("ÂNGELA"), "aNGELA");
        assert_eq!(normalize_accents("Müller"), "Muller");
        assert_eq!(normalize_accents("Peña"), "Pena");
    }

    #[test]
    fn test_cedilla_expands() {
        assert_eq!(normalize_accents("Ç"), "ss");
        assert_eq!(normalize_accents("GONÇALVES"), "GONssALVES");
        assert_eq!(normalize_accents("ç").chars().count(), 2);
    }

    #[test]
    fn test_idempotent() {
        let once = normalize_accents("Conceição Araújo Brandão");
        assert!(is_normalized(&once));
        assert_eq!(normalize_accents(&once), once);
    }

    #[test]
    fn test_unknown_non_ascii_untouched() {
        // Uppercase Ñ is not part of the table
        assert_eq!(normalize_accents("Ñ"), "Ñ");
        assert!(!is_normalized("ñ"));
    }

    #[test]
    fn test_table_keys_unique() {
        assert_eq!(ACCENT_MAP.len(), ACCENT_TABLE.len());
    }
}
