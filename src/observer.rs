//! Hooks into the name alignment
//!
//! [`NameMatcher::sim`](crate::NameMatcher::sim) reports each decision it takes
//! to a [`SimObserver`]. Observers see the alignment; they cannot change it.

/// Which of the two compared names a token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A word of the left name aligned with a word of the right name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchEvent<'a> {
    pub left_index: usize,
    pub right_index: usize,
    pub left_word: &'a str,
    pub right_word: &'a str,
    /// Literal similarity of the two words
    pub similarity: f64,
    /// Search start in the right name before this match
    pub position: usize,
    /// Right-side prepositions skipped on the way to this match
    pub skipped_prepositions: usize,
}

/// Final tally of an alignment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreEvent {
    pub matches: usize,
    pub left_len: usize,
    pub right_len: usize,
    pub prepositions: usize,
    pub score: f64,
}

/// Receives alignment decisions. Every method defaults to a no-op.
pub trait SimObserver: Send + Sync {
    /// A preposition was excluded from weighting.
    ///
    /// Right-side prepositions are reported only when the scan that passed
    /// over them ends in a match; a scan that finds nothing reports none.
    fn on_preposition(&self, _side: Side, _index: usize, _word: &str) {}

    fn on_match(&self, _event: &MatchEvent<'_>) {}

    /// No word of the right name could be aligned with this left word.
    fn on_no_match(&self, _left_index: usize, _left_word: &str) {}

    fn on_score(&self, _event: &ScoreEvent) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Forwards alignment decisions to `tracing`.
///
/// Per-word decisions go out at `TRACE`, the final score at `DEBUG`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SimObserver for TracingObserver {
    fn on_preposition(&self, side: Side, index: usize, word: &str) {
        tracing::trace!(?side, index, word, "preposition skipped");
    }

    fn on_match(&self, event: &MatchEvent<'_>) {
        tracing::trace!(
            i = event.left_index,
            j = event.right_index,
            left = event.left_word,
            right = event.right_word,
            similarity = event.similarity,
            pos = event.position,
            new_pos = event.right_index + 1,
            skipped_prepositions = event.skipped_prepositions,
            "word matched"
        );
    }

    fn on_no_match(&self, left_index: usize, left_word: &str) {
        tracing::trace!(i = left_index, word = left_word, "no match");
    }

    fn on_score(&self, event: &ScoreEvent) {
        tracing::debug!(
            matches = event.matches,
            len1 = event.left_len,
            len2 = event.right_len,
            prepositions = event.prepositions,
            score = event.score,
            "name similarity"
        );
    }
}

impl<O: SimObserver + ?Sized> SimObserver for &O {
    fn on_preposition(&self, side: Side, index: usize, word: &str) {
        (**self).on_preposition(side, index, word);
    }

    fn on_match(&self, event: &MatchEvent<'_>) {
        (**self).on_match(event);
    }

    fn on_no_match(&self, left_index: usize, left_word: &str) {
        (**self).on_no_match(left_index, left_word);
    }

    fn on_score(&self, event: &ScoreEvent) {
        (**self).on_score(event);
    }
}
