//! Parser configuration and actor privileges.

use std::collections::BTreeSet;

use mudlex_lexicon::VerbTier;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the parser.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParserConfig {
    /// Filler words a span may match with or without ("the", "a", "an").
    pub ignore_words: BTreeSet<String>,

    /// Whether builder-tier verbs may bind objects outside the actor's scopes.
    pub builder_fallback: bool,

    /// Upper bound on candidates returned for one input. Zero acts as one.
    pub max_candidates: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            ignore_words: ["the", "a", "an"].into_iter().map(String::from).collect(),
            builder_fallback: true,
            max_candidates: 16,
        }
    }
}

impl ParserConfig {
    /// A configuration with no filler words and no builder fallback.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            ignore_words: BTreeSet::new(),
            builder_fallback: false,
            ..Self::default()
        }
    }

    /// Builder method to add a filler word.
    #[must_use]
    pub fn with_ignore_word(mut self, word: &str) -> Self {
        self.ignore_words.insert(word.to_lowercase());
        self
    }

    /// Builder method to enable/disable the builder fallback.
    #[must_use]
    pub fn with_builder_fallback(mut self, enabled: bool) -> Self {
        self.builder_fallback = enabled;
        self
    }

    /// Builder method to set the candidate limit.
    #[must_use]
    pub fn with_max_candidates(mut self, limit: usize) -> Self {
        self.max_candidates = limit.max(1);
        self
    }

    /// Returns true if the word is filler.
    #[must_use]
    pub fn is_ignored(&self, word: &str) -> bool {
        self.ignore_words.contains(word)
    }
}

/// What the person typing is allowed to do.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Actor {
    /// Builders see builder-tier verbs.
    pub builder: bool,
    /// Edit mode exposes edit-mode verbs.
    pub edit_mode: bool,
}

impl Actor {
    /// An ordinary player.
    #[must_use]
    pub const fn player() -> Self {
        Self {
            builder: false,
            edit_mode: false,
        }
    }

    /// A builder outside edit mode.
    #[must_use]
    pub const fn builder() -> Self {
        Self {
            builder: true,
            edit_mode: false,
        }
    }

    /// Builder method to enter or leave edit mode.
    #[must_use]
    pub const fn with_edit_mode(mut self, edit_mode: bool) -> Self {
        self.edit_mode = edit_mode;
        self
    }

    /// Returns true if this actor may use verbs from the tier.
    #[must_use]
    pub const fn can_use(self, tier: VerbTier) -> bool {
        match tier {
            VerbTier::Global => true,
            VerbTier::Builder => self.builder,
            VerbTier::EditMode => self.edit_mode,
        }
    }
}
