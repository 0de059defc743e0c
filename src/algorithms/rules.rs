//! Phonetic rewrite rules
//!
//! A rule table is an ordered list of context-sensitive rewrite rules. At each
//! cursor position the transcriber scans the table top to bottom and applies
//! the first rule whose pattern matches, so the order of [`PORTUGUESE_RULES`]
//! decides the resulting codes.
//!
//! Rules are declared as plain [`RuleSpec`] data and compiled into a
//! [`RuleSet`], which rejects malformed rules up front.

use crate::error::{MetaphoneError, Result};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// Declarative form of a rewrite rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSpec {
    /// Regular expression matched at `cursor + context_offset`, case-insensitively
    pub pattern: &'static str,
    /// Code fragment appended on match
    pub emission: &'static str,
    /// Where the match window starts, relative to the cursor (lookback when negative)
    pub context_offset: isize,
    /// How many characters the cursor advances on match
    pub consume_length: usize,
    /// Restrict the rule to cursor position 0
    pub first_only: bool,
}

const fn rule(
    pattern: &'static str,
    emission: &'static str,
    context_offset: isize,
    consume_length: usize,
    first_only: bool,
) -> RuleSpec {
    RuleSpec {
        pattern,
        emission,
        context_offset,
        consume_length,
        first_only,
    }
}

/// Brazilian Portuguese rule table.
///
/// Source: metaphone-ptbr (http://sourceforge.net/p/metaphoneptbr/code/ci/master/tree/README).
/// Keep the order intact.
pub const PORTUGUESE_RULES: &[RuleSpec] = &[
    rule("(?i)^a", "A", 0, 1, true),
    rule("(?i)^[ei]", "I", 0, 1, true),
    rule("(?i)^[ou]", "U", 0, 1, true),
    rule("(?i)^b", "B", 0, 1, false),
    rule("(?i)^c(?:(?:[bcdfgjklmnpqrstvwxzaou])|$)", "K", 0, 1, false),
    rule("(?i)^chr", "KR", 0, 3, false),
    rule("(?i)^c[ei]", "S", 0, 1, false),
    rule("(?i)^d", "D", 0, 1, false),
    rule("(?i)^f", "F", 0, 1, false),
    rule("(?i)^g[aou]", "G", 0, 1, false),
    rule("(?i)^gh[bcdfgjklmnpqrstvwxz]", "G", 0, 2, false),
    rule("(?i)^g[ei]", "J", 0, 1, false),
    rule("(?i)^gh[ei]", "J", 0, 2, false),
    rule("(?i)^ha", "A", 0, 2, true),
    rule("(?i)^h[ei]", "I", 0, 2, true),
    rule("(?i)^h[ou]", "U", 0, 2, true),
    rule("(?i)^lh", "1", 0, 2, false),
    rule("(?i)^nh", "3", 0, 1, false),
    rule("(?i)^h", "", 0, 1, false),
    rule("(?i)^j", "J", 0, 1, false),
    rule("(?i)^k", "K", 0, 1, false),
    rule("(?i)^l[aou]", "l", 0, 1, false),
    rule("(?i)^m", "M", 0, 1, false),
    rule("(?i)^n$", "M", 0, 1, false),
    rule("(?i)^ph", "F", 0, 1, false),
    rule("(?i)^p", "P", 0, 1, false),
    rule("(?i)^q", "K", 0, 1, false),
    rule("(?i)^qu", "K", 0, 2, false),
    rule("(?i)^r", "2", 0, 1, true),
    rule("(?i)^r$", "R", 0, 1, false),
    rule("(?i)^rr", "2", 0, 2, false),
    rule("(?i)^[aou]r[aeiou]", "R", -1, 1, false),
    rule("(?i)^.r[bcdfghjklmnpqrstvwxz]", "R", -1, 1, false),
    rule("(?i)^[bcdfghjklmnpqrstvwxz]r[aeiou]", "R", -1, 1, false),
    rule("(?i)^ss", "S", 0, 2, false),
    rule("(?i)^(?:s|c)h", "X", 0, 2, false),
    rule("(?i)^sch", "X", 0, 3, false),
    rule("(?i)^sc[ei]", "S", 0, 1, false),
    rule("(?i)^sc", "SK", 0, 2, false),
    rule("(?i)^s[bdfgjklmnpqrstvwxz]", "S", 0, 1, false),
    rule("(?i)^t", "T", 0, 1, false),
    rule("(?i)^th", "T", 0, 2, false),
    rule("(?i)^v", "V", 0, 1, false),
    rule("(?i)^w[lraeiou]", "V", 0, 1, false),
    rule("(?i)^w[bcdfghjklmnpqrstvwxz]", "", 0, 1, false),
    rule("(?i)^x$", "X", 0, 1, false),
    rule("(?i)^ex[aeiou]", "Z", -1, 1, true),
    rule("(?i)^ex[ei]", "X", -1, 1, false),
    rule("(?i)^ex[ptc]", "S", -1, 1, false),
    rule("(?i)^.ex[aou]", "X", -2, 1, false),
    rule("(?i)^ex[aou]", "KS", -1, 1, false),
    rule("(?i)^ex.", "KS", -1, 1, false),
    rule("(?i)^[aeiouckglrx][aiou]x", "X", -2, 1, false),
    rule("(?i)^[dfmnpqstvz][aou]x", "KS", -2, 1, false),
    rule("(?i)^[aeiou][i][aeiou]", "I", -1, 1, false),
    rule("(?i)^[y]", "I", 0, 1, false),
    rule("(?i)^Z$", "S", 0, 1, false),
    rule("(?i)^Z", "Z", 0, 1, false),
    rule("(?i)^X", "X", 0, 1, false),
    rule("(?i)^S", "S", 0, 1, false),
];

/// A compiled rewrite rule.
#[derive(Debug, Clone)]
pub struct Rule {
    spec: RuleSpec,
    matcher: Regex,
}

impl Rule {
    /// Compile a rule, rejecting it if it could stall the cursor or never match.
    ///
    /// The pattern is anchored at the start of the match window regardless of
    /// whether it spells out `^`.
    pub fn compile(index: usize, spec: RuleSpec) -> Result<Self> {
        if spec.consume_length == 0 {
            return Err(MetaphoneError::InvalidRule {
                index,
                reason: "consume length must be positive".to_string(),
            });
        }
        if spec.pattern.is_empty() {
            return Err(MetaphoneError::InvalidRule {
                index,
                reason: "pattern is empty".to_string(),
            });
        }

        let matcher = RegexBuilder::new(&format!("^(?:{})", spec.pattern))
            .case_insensitive(true)
            .build()
            .map_err(|e| MetaphoneError::InvalidRule {
                index,
                reason: format!("pattern {:?} does not compile: {}", spec.pattern, e),
            })?;

        Ok(Self { spec, matcher })
    }

    /// The declarative form this rule was compiled from
    #[inline]
    pub fn spec(&self) -> &RuleSpec {
        &self.spec
    }

    #[inline]
    pub fn emission(&self) -> &'static str {
        self.spec.emission
    }

    #[inline]
    pub fn consume_length(&self) -> usize {
        self.spec.consume_length
    }

    /// Start of the match window for a cursor, or `None` if it falls before the word.
    #[inline]
    pub fn window_start(&self, cursor: usize) -> Option<usize> {
        cursor.checked_add_signed(self.spec.context_offset)
    }

    /// Whether the rule may fire at `cursor`, ignoring the pattern.
    #[inline]
    pub fn applies_at(&self, cursor: usize) -> bool {
        !(self.spec.first_only && cursor > 0)
    }

    /// Test the pattern against the text starting at the match window.
    #[inline]
    pub fn is_match(&self, window: &str) -> bool {
        self.matcher.is_match(window)
    }
}

/// An ordered, validated rule table.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Compile a table, failing on the first malformed rule.
    pub fn compile(specs: &[RuleSpec]) -> Result<Self> {
        let rules = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| Rule::compile(i, *spec))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(rules = rules.len(), "compiled phonetic rule table");
        Ok(Self { rules })
    }

    /// The built-in Brazilian Portuguese table.
    pub fn portuguese() -> &'static RuleSet {
        &PORTUGUESE
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in priority order
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

static PORTUGUESE: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::compile(PORTUGUESE_RULES).expect("built-in Portuguese rule table is valid")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_compiles() {
        let rules = RuleSet::portuguese();
        assert_eq!(rules.len(), PORTUGUESE_RULES.len());
        assert!(!rules.is_empty());
    }

    #[test]
    fn test_order_preserved() {
        let emissions: Vec<&str> = RuleSet::portuguese()
            .iter()
            .take(3)
            .map(Rule::emission)
            .collect();
        assert_eq!(emissions, vec!["A", "I", "U"]);
        let last = RuleSet::portuguese().iter().last().map(|r| r.spec().pattern);
        assert_eq!(last, Some("(?i)^S"));
    }

    #[test]
    fn test_zero_consume_rejected() {
        let err = RuleSet::compile(&[rule("a", "A", 0, 1, false), rule("b", "B", 0, 0, false)])
            .unwrap_err();
        assert_eq!(
            err,
            MetaphoneError::InvalidRule {
                index: 1,
                reason: "consume length must be positive".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_pattern_rejected() {
        assert!(matches!(
            RuleSet::compile(&[rule("", "A", 0, 1, false)]),
            Err(MetaphoneError::InvalidRule { index: 0, .. })
        ));
    }

    #[test]
    fn test_bad_regex_rejected() {
        assert!(matches!(
            Rule::compile(7, rule("[ab", "A", 0, 1, false)),
            Err(MetaphoneError::InvalidRule { index: 7, .. })
        ));
    }

    #[test]
    fn test_patterns_are_anchored_and_case_insensitive() {
        let r = Rule::compile(0, rule("lh", "1", 0, 2, false)).unwrap();
        assert!(r.is_match("LHO"));
        assert!(r.is_match("lho"));
        assert!(!r.is_match("OLHO"));
    }

    #[test]
    fn test_window_and_first_only() {
        let r = Rule::compile(0, rule("ex.", "KS", -1, 1, false)).unwrap();
        assert_eq!(r.window_start(0), None);
        assert_eq!(r.window_start(3), Some(2));

        let first = Rule::compile(0, rule("a", "A", 0, 1, true)).unwrap();
        assert!(first.applies_at(0));
        assert!(!first.applies_at(1));
    }
}
