//! Word-level building blocks
//!
//! Accent normalization, the phonetic rule engine and edit distance, each as
//! standalone functions plus a trait-based interface for composing metrics.

pub mod levenshtein;
pub mod normalize;
pub mod phonetic;
pub mod rules;

pub use levenshtein::*;
pub use normalize::*;
pub use phonetic::*;
pub use rules::*;

/// Trait for all similarity metrics.
/// Returns a value between 0.0 (completely different) and 1.0 (identical).
pub trait Similarity: Send + Sync {
    fn similarity(&self, a: &str, b: &str) -> f64;

    /// Convenience method for distance (1.0 - similarity)
    fn distance(&self, a: &str, b: &str) -> f64 {
        1.0 - self.similarity(a, b)
    }

    /// Name of the algorithm for debugging/logging
    fn name(&self) -> &'static str;
}

/// Trait for edit distance algorithms that return integer distances
pub trait EditDistance: Send + Sync {
    fn distance(&self, a: &str, b: &str) -> usize;

    /// Convert to normalized similarity score (0.0 to 1.0)
    fn similarity(&self, a: &str, b: &str) -> f64 {
        let max_len = a.chars().count().max(b.chars().count());
        if max_len == 0 {
            1.0
        } else {
            1.0 - (self.distance(a, b) as f64 / max_len as f64)
        }
    }

    fn name(&self) -> &'static str;
}

/// Any EditDistance is also a Similarity
impl<T: EditDistance> Similarity for T {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        EditDistance::similarity(self, a, b)
    }

    fn name(&self) -> &'static str {
        EditDistance::name(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_distance_blanket_similarity() {
        let lev = Levenshtein::new();
        assert_eq!(Similarity::similarity(&lev, "ab", "ab"), 1.0);
        assert!((Similarity::distance(&lev, "abcd", "abce") - 0.25).abs() < 1e-9);
        assert_eq!(Similarity::name(&lev), "levenshtein");
    }

    #[test]
    fn test_metrics_as_trait_objects() {
        let metrics: Vec<Box<dyn Similarity>> = vec![Box::new(Levenshtein::new()), Box::new(MetaphoneBr)];
        for m in &metrics {
            assert_eq!(m.similarity("TIAGO", "TIAGO"), 1.0);
        }
    }
}
