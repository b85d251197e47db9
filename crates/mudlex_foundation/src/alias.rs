//! Case-insensitive alias keys.

use std::borrow::{Borrow, Cow};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A word or phrase that names an object (noun) or a command (verb).
///
/// Aliases are normalized on construction: surrounding whitespace is
/// trimmed, internal runs of whitespace collapse to a single space, and the
/// text is lowercased. Two aliases are equal iff their normalized text is
/// equal, so `"Gold  Ring"` and `"gold ring"` name the same thing.
///
/// `Alias` borrows as `str`, so maps keyed by `Alias` can be queried with
/// already-normalized text (such as joined token spans) without allocating.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String"))]
pub struct Alias(String);

impl Alias {
    /// Creates an alias from arbitrary text, normalizing it.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self(normalize(text))
    }

    /// Returns the normalized text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the alias contains no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of words in the alias.
    #[must_use]
    pub fn word_count(&self) -> usize {
        if self.0.is_empty() {
            0
        } else {
            self.0.split(' ').count()
        }
    }
}

/// Normalizes text the same way [`Alias::new`] does.
#[must_use]
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&word.to_lowercase());
    }
    out
}

/// Normalizes text for lookup, borrowing it when it is already normal.
///
/// Joined token spans are already normal, so the parser's lookups never
/// allocate; text typed by a caller is normalized on the way in.
#[must_use]
pub fn normalized(text: &str) -> Cow<'_, str> {
    if is_normal(text) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(normalize(text))
    }
}

fn is_normal(text: &str) -> bool {
    let mut after_space = true;
    for c in text.chars() {
        if c == ' ' {
            if after_space {
                return false;
            }
            after_space = true;
        } else if c.is_whitespace() || c.to_lowercase().ne(std::iter::once(c)) {
            return false;
        } else {
            after_space = false;
        }
    }
    !after_space || text.is_empty()
}

impl Borrow<str> for Alias {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Alias {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Alias {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Alias {
    fn from(text: String) -> Self {
        Self::new(&text)
    }
}

impl fmt::Debug for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Alias({:?})", self.0)
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
