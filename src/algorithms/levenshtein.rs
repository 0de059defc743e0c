//! Levenshtein (edit) distance
//!
//! Unit-cost insertions, deletions and substitutions over Unicode scalar
//! values. Comparison is case-sensitive. Uses a single DP row kept on the
//! stack for the short strings typical of names and phonetic codes.

use super::EditDistance;
use smallvec::SmallVec;

type Row = SmallVec<[usize; 32]>;

/// Single-row DP over char slices, `short` on the column axis.
///
/// With `max_distance` set, gives up as soon as every cell of a row exceeds it.
fn dp_distance(short: &[char], long: &[char], max_distance: Option<usize>) -> Option<usize> {
    let mut row: Row = (0..=short.len()).collect();

    for (i, &lc) in long.iter().enumerate() {
        let mut diag = row[0];
        row[0] = i + 1;
        let mut row_min = row[0];

        for (j, &sc) in short.iter().enumerate() {
            let substitution = diag + usize::from(lc != sc);
            let deletion = row[j + 1] + 1;
            let insertion = row[j] + 1;

            diag = row[j + 1];
            row[j + 1] = substitution.min(deletion).min(insertion);
            row_min = row_min.min(row[j + 1]);
        }

        if max_distance.is_some_and(|max_d| row_min > max_d) {
            return None;
        }
    }

    let dist = row[short.len()];
    match max_distance {
        Some(max_d) if dist > max_d => None,
        _ => Some(dist),
    }
}

/// Levenshtein distance calculator with optional early termination
///
/// # Complexity
/// - Time: O(m*n) where m and n are string lengths
/// - Space: O(min(m,n))
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Levenshtein {
    /// Maximum distance to compute (for early termination)
    pub max_distance: Option<usize>,
}

impl Levenshtein {
    #[must_use]
    pub fn new() -> Self {
        Self { max_distance: None }
    }

    #[must_use]
    pub fn with_max_distance(max_distance: usize) -> Self {
        Self {
            max_distance: Some(max_distance),
        }
    }

    /// Returns `None` if the distance exceeds `max_distance`.
    #[must_use]
    pub fn compute(&self, a: &str, b: &str) -> Option<usize> {
        levenshtein_distance_bounded(a, b, self.max_distance)
    }
}

impl EditDistance for Levenshtein {
    fn distance(&self, a: &str, b: &str) -> usize {
        // Past the threshold, report max_distance + 1
        match self.max_distance {
            Some(max_d) => levenshtein_distance_bounded(a, b, Some(max_d))
                .unwrap_or(max_d.saturating_add(1)),
            None => levenshtein(a, b),
        }
    }

    fn name(&self) -> &'static str {
        "levenshtein"
    }
}

/// Compute Levenshtein distance with optional max threshold.
///
/// Returns `None` if distance exceeds `max_distance` (early termination).
///
/// # Example
/// ```
/// use metaphone_br::algorithms::levenshtein::levenshtein_distance_bounded;
///
/// assert_eq!(levenshtein_distance_bounded("kitten", "sitting", None), Some(3));
/// assert_eq!(levenshtein_distance_bounded("SOUZA", "SOUSA", Some(1)), Some(1));
/// assert_eq!(levenshtein_distance_bounded("abcdef", "ghijkl", Some(3)), None);
/// ```
#[must_use]
pub fn levenshtein_distance_bounded(a: &str, b: &str, max_distance: Option<usize>) -> Option<usize> {
    if a == b {
        return Some(0);
    }

    let a_chars: SmallVec<[char; 32]> = a.chars().collect();
    let b_chars: SmallVec<[char; 32]> = b.chars().collect();
    let (short, long) = if a_chars.len() <= b_chars.len() {
        (&a_chars[..], &b_chars[..])
    } else {
        (&b_chars[..], &a_chars[..])
    };

    // The length gap alone is a lower bound
    if max_distance.is_some_and(|max_d| long.len() - short.len() > max_d) {
        return None;
    }
    if short.is_empty() {
        return Some(long.len());
    }

    dp_distance(short, long, max_distance)
}

/// Unbounded Levenshtein distance.
#[inline]
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    levenshtein_distance_bounded(a, b, None).unwrap_or_default()
}

/// Normalized similarity: `1 - distance / max(len(a), len(b))`.
///
/// Two empty strings are identical and score 1.0.
#[inline]
#[must_use]
pub fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - (levenshtein(a, b) as f64 / max_len as f64)
}
