//! Input tokenization.
//!
//! Splits a raw line of player input on whitespace into tokens that keep
//! both the original spelling (for free-text slots) and a lowercase form
//! (for alias lookup).

use std::fmt;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One word of player input.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Token {
    original: String,
    normalized: String,
}

impl Token {
    /// Creates a token from a word as typed.
    #[must_use]
    pub fn new(word: &str) -> Self {
        Self {
            original: word.to_string(),
            normalized: word.to_lowercase(),
        }
    }

    /// The word as typed.
    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The word lowercased.
    #[must_use]
    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

/// Half-open `[start, end)` range of token indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TokenRange {
    /// First index in the range.
    pub start: usize,
    /// One past the last index.
    pub end: usize,
}

impl TokenRange {
    /// Creates a range. An inverted range is clamped to empty.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        if end < start {
            Self { start, end: start }
        } else {
            Self { start, end }
        }
    }

    /// Number of tokens covered.
    #[must_use]
    pub const fn len(self) -> usize {
        self.end - self.start
    }

    /// Returns true if the range covers no tokens.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start >= self.end
    }

    /// The part of this range after `other` ends.
    #[must_use]
    pub const fn after(self, other: Self) -> Self {
        Self::new(other.end, self.end)
    }

    /// The part of this range before `index`.
    #[must_use]
    pub const fn before(self, index: usize) -> Self {
        Self::new(self.start, index)
    }

    /// The same range as a slice index.
    #[must_use]
    pub const fn as_range(self) -> Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for TokenRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// An ordered, immutable sequence of tokens from one input line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TokenSequence {
    tokens: Vec<Token>,
}

impl TokenSequence {
    /// Tokenizes a raw line. Blank input yields an empty sequence.
    #[must_use]
    pub fn tokenize(input: &str) -> Self {
        Self {
            tokens: input.split_whitespace().map(Token::new).collect(),
        }
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if there are no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The range covering every token.
    #[must_use]
    pub fn full(&self) -> TokenRange {
        TokenRange::new(0, self.tokens.len())
    }

    /// Tokens in a range, clamped to the sequence.
    #[must_use]
    pub fn slice(&self, range: TokenRange) -> &[Token] {
        let end = range.end.min(self.tokens.len());
        let start = range.start.min(end);
        &self.tokens[start..end]
    }

    /// Joins the original words of a range with single spaces.
    #[must_use]
    pub fn original(&self, range: TokenRange) -> String {
        join(self.slice(range).iter().map(Token::original))
    }

    /// Joins the lowercase words of a range with single spaces.
    #[must_use]
    pub fn normalized(&self, range: TokenRange) -> String {
        join(self.slice(range).iter().map(Token::normalized))
    }

    /// Iterates over the tokens.
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }
}

fn join<'a>(words: impl Iterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for word in words {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
