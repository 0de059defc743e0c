//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Errors raised while building configuration, parsing names or scoring them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetaphoneError {
    /// No name can be built from the input: it has no run of letters, or
    /// its words and codes do not line up.
    #[error("Invalid name: {0:?}")]
    InvalidName(String),

    /// The similarity denominator collapsed to zero.
    #[error(
        "Similarity undefined: {len1} + {len2} words minus {prepositions} prepositions leaves nothing to compare"
    )]
    UndefinedSimilarity {
        len1: usize,
        len2: usize,
        prepositions: usize,
    },

    /// A rule was rejected while loading a rule table.
    #[error("Rule {index} rejected: {reason}")]
    InvalidRule { index: usize, reason: String },

    /// The Levenshtein threshold must be a finite, non-negative number.
    #[error("Levenshtein threshold must be finite and >= 0, got {0}")]
    InvalidThreshold(f64),

    /// A batch parameter is out of its valid range.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, MetaphoneError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MetaphoneError::InvalidName("123".to_string());
        assert_eq!(err.to_string(), "Invalid name: \"123\"");

        let err = MetaphoneError::InvalidRule {
            index: 3,
            reason: "consume length must be positive".to_string(),
        };
        assert_eq!(err.to_string(), "Rule 3 rejected: consume length must be positive");
    }

    #[test]
    fn test_undefined_similarity_message() {
        let err = MetaphoneError::UndefinedSimilarity {
            len1: 1,
            len2: 1,
            prepositions: 2,
        };
        assert!(err.to_string().contains("2 prepositions"));
    }
}
