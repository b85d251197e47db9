//! Span matching.
//!
//! Finds the token span that names something, widest first. Each candidate
//! span is tested twice: once as typed, and once with filler words removed,
//! so "the gold ring" matches an alias of either "the gold ring" or
//! "gold ring".

use tracing::trace;

use mudlex_foundation::Alias;

use crate::config::ParserConfig;
use crate::tokenizer::{TokenRange, TokenSequence};

/// A successful span match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpanMatch {
    /// Tokens consumed.
    pub range: TokenRange,
    /// The alias that matched.
    pub alias: Alias,
}

/// Matches token spans against an alias predicate.
#[derive(Clone, Copy, Debug)]
pub struct SpanMatcher<'a> {
    tokens: &'a TokenSequence,
    config: &'a ParserConfig,
    strip_filler: bool,
}

impl<'a> SpanMatcher<'a> {
    /// Creates a matcher over a token sequence.
    #[must_use]
    pub fn new(tokens: &'a TokenSequence, config: &'a ParserConfig) -> Self {
        Self {
            tokens,
            config,
            strip_filler: true,
        }
    }

    /// A copy that matches spans only as typed, never with filler removed.
    ///
    /// Verbs and prepositions match literally so that a following article
    /// stays with the object it introduces.
    #[must_use]
    pub fn literal(self) -> Self {
        Self {
            strip_filler: false,
            ..self
        }
    }

    /// The tokens being matched.
    #[must_use]
    pub fn tokens(&self) -> &'a TokenSequence {
        self.tokens
    }

    /// Finds the widest prefix of `range` whose text satisfies `known`.
    ///
    /// Tries `[start, end)`, then `[start, end - 1)`, down to a single token.
    pub fn longest_match(
        &self,
        range: TokenRange,
        known: impl Fn(&str) -> bool,
    ) -> Option<SpanMatch> {
        (range.start + 1..=range.end).rev().find_map(|end| {
            let candidate = TokenRange::new(range.start, end);
            self.test(candidate, &known)
        })
    }

    /// Matches the whole of `range` or nothing.
    pub fn exact_match(
        &self,
        range: TokenRange,
        known: impl Fn(&str) -> bool,
    ) -> Option<SpanMatch> {
        if range.is_empty() {
            return None;
        }
        self.test(range, &known)
    }

    fn test(&self, range: TokenRange, known: &impl Fn(&str) -> bool) -> Option<SpanMatch> {
        let words = self.tokens.slice(range);
        if words.is_empty() {
            return None;
        }

        let full = self.tokens.normalized(range);
        if known(&full) {
            trace!(%range, alias = %full, "span matched");
            return Some(SpanMatch {
                range,
                alias: Alias::from(full),
            });
        }
        if !self.strip_filler {
            return None;
        }

        let stripped: Vec<&str> = words
            .iter()
            .map(|token| token.normalized())
            .filter(|word| !self.config.is_ignored(word))
            .collect();
        if stripped.is_empty() || stripped.len() == words.len() {
            return None;
        }

        let stripped = stripped.join(" ");
        if known(&stripped) {
            trace!(%range, alias = %stripped, "span matched without filler");
            return Some(SpanMatch {
                range,
                alias: Alias::from(stripped),
            });
        }
        None
    }
}
