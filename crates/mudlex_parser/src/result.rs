//! Parse results.
//!
//! A parse never fails with an error. Every attempt yields a
//! [`ParseResult`] whose [`ParseStatus`] records how far parsing got.

use std::fmt;

use mudlex_foundation::{Alias, ObjectId, ObjectSet};
use mudlex_lexicon::{CommandId, Placement, PrepositionRole, SentenceShape, VerbPriority};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How far parsing got, ordered by the point where it stopped.
///
/// `Invalid*` means the word names nothing anywhere in the world;
/// `Unavailable*` means it names something that is not in reach.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ParseStatus {
    /// The verb is not a known word.
    InvalidVerb,
    /// The verb exists but is not available here.
    UnavailableVerb,
    /// The direct object is missing, unknown, or followed by stray words.
    InvalidDirect,
    /// The direct object exists but is not in reach.
    UnavailableDirect,
    /// No accepted preposition was found.
    InvalidPreposition,
    /// The indirect object is missing or unknown.
    InvalidIndirect,
    /// The indirect object exists but is not in reach.
    UnavailableIndirect,
    /// Every required slot bound.
    Valid,
}

impl ParseStatus {
    /// Returns true for [`ParseStatus::Valid`].
    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// What one grammatical slot bound to.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binding {
    /// The words as typed.
    pub text: String,
    /// The alias that matched, for object slots.
    pub alias: Option<Alias>,
    /// Objects the alias resolved to; empty for text slots.
    pub objects: ObjectSet,
}

impl Binding {
    /// A free-text binding.
    #[must_use]
    pub fn text(text: String) -> Self {
        Self {
            text,
            alias: None,
            objects: ObjectSet::new(),
        }
    }

    /// An object binding.
    #[must_use]
    pub fn object(text: String, alias: Alias, objects: ObjectSet) -> Self {
        Self {
            text,
            alias: Some(alias),
            objects,
        }
    }

    /// Returns true if more than one object answers to the alias.
    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        self.objects.len() > 1
    }
}

/// The verb half of a parse: which meaning of the verb is being tried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerbBinding {
    /// Priority of the meaning.
    pub priority: VerbPriority,
    /// Command the meaning dispatches to.
    pub command: CommandId,
    /// The verb alias as matched.
    pub alias: Alias,
    /// Object providing the verb, for local verbs.
    pub object: Option<ObjectId>,
    /// Shape of the meaning's grammar.
    pub shape: SentenceShape,
}

/// The slot half of a parse, as produced by a sentence shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentenceMatch {
    /// Where parsing stopped.
    pub status: ParseStatus,
    /// Direct slot, if bound.
    pub direct: Option<Binding>,
    /// Preposition as typed, with its role.
    pub preposition: Option<(String, PrepositionRole)>,
    /// Indirect slot, if bound.
    pub indirect: Option<Binding>,
    /// Words left over.
    pub unparsed: String,
}

impl SentenceMatch {
    /// A match that stopped at `status` with `unparsed` left over.
    #[must_use]
    pub fn stopped(status: ParseStatus, unparsed: String) -> Self {
        Self {
            status,
            direct: None,
            preposition: None,
            indirect: None,
            unparsed,
        }
    }
}

/// Structured interpretation of one input line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseResult {
    status: ParseStatus,
    priority: VerbPriority,
    command: Option<CommandId>,
    verb: Option<Alias>,
    verb_object: Option<ObjectId>,
    shape: Option<SentenceShape>,
    direct: Option<Binding>,
    preposition: Option<String>,
    role: Option<PrepositionRole>,
    placement: Option<Placement>,
    indirect: Option<Binding>,
    unparsed: String,
}

impl ParseResult {
    /// A result for input whose verb could not be used.
    #[must_use]
    pub fn verb_failure(
        status: ParseStatus,
        priority: VerbPriority,
        verb: Option<Alias>,
        unparsed: String,
    ) -> Self {
        Self {
            status,
            priority,
            command: None,
            verb,
            verb_object: None,
            shape: None,
            direct: None,
            preposition: None,
            role: None,
            placement: None,
            indirect: None,
            unparsed,
        }
    }

    /// Combines a verb meaning with the slots its shape bound.
    ///
    /// Applies the preposition role: placements are recorded, and `Of`
    /// exchanges the direct and indirect bindings once both are bound.
    #[must_use]
    pub fn assemble(verb: VerbBinding, sentence: SentenceMatch) -> Self {
        let SentenceMatch {
            status,
            mut direct,
            preposition,
            mut indirect,
            unparsed,
        } = sentence;
        let (preposition, role) = match preposition {
            Some((text, role)) => (Some(text), Some(role)),
            None => (None, None),
        };

        if role.is_some_and(PrepositionRole::swaps_objects)
            && status.is_valid()
            && direct.is_some()
            && indirect.is_some()
        {
            std::mem::swap(&mut direct, &mut indirect);
        }

        Self {
            status,
            priority: verb.priority,
            command: Some(verb.command),
            verb: Some(verb.alias),
            verb_object: verb.object,
            shape: Some(verb.shape),
            direct,
            preposition,
            role,
            placement: role.and_then(PrepositionRole::placement),
            indirect,
            unparsed,
        }
    }

    /// How far parsing got.
    #[must_use]
    pub fn status(&self) -> ParseStatus {
        self.status
    }

    /// Returns true if every slot bound.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.status.is_valid()
    }

    /// Priority of the verb meaning used.
    #[must_use]
    pub fn priority(&self) -> VerbPriority {
        self.priority
    }

    /// Command to dispatch, when a verb meaning was found.
    #[must_use]
    pub fn command(&self) -> Option<&CommandId> {
        self.command.as_ref()
    }

    /// The verb alias as matched.
    #[must_use]
    pub fn verb(&self) -> Option<&Alias> {
        self.verb.as_ref()
    }

    /// Object providing the verb, for local verbs.
    #[must_use]
    pub fn verb_object(&self) -> Option<ObjectId> {
        self.verb_object
    }

    /// Shape of the grammar used.
    #[must_use]
    pub fn shape(&self) -> Option<SentenceShape> {
        self.shape
    }

    /// Direct slot binding.
    #[must_use]
    pub fn direct(&self) -> Option<&Binding> {
        self.direct.as_ref()
    }

    /// Preposition as typed.
    #[must_use]
    pub fn preposition(&self) -> Option<&str> {
        self.preposition.as_deref()
    }

    /// Role of the matched preposition.
    #[must_use]
    pub fn role(&self) -> Option<PrepositionRole> {
        self.role
    }

    /// Placement implied by the preposition.
    #[must_use]
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// Indirect slot binding.
    #[must_use]
    pub fn indirect(&self) -> Option<&Binding> {
        self.indirect.as_ref()
    }

    /// Words left over.
    #[must_use]
    pub fn unparsed(&self) -> &str {
        &self.unparsed
    }

    /// Number of words left over.
    #[must_use]
    pub fn unparsed_words(&self) -> usize {
        self.unparsed.split_whitespace().count()
    }
}

impl fmt::Display for ParseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.status)?;
        if let Some(command) = &self.command {
            write!(f, " {command}")?;
        }
        if let Some(direct) = &self.direct {
            write!(f, " [{}", direct.text)?;
            if !direct.objects.is_empty() {
                write!(f, " -> {:?}", direct.objects)?;
            }
            write!(f, "]")?;
        }
        if let Some(preposition) = &self.preposition {
            write!(f, " {preposition}")?;
        }
        if let Some(indirect) = &self.indirect {
            write!(f, " [{}", indirect.text)?;
            if !indirect.objects.is_empty() {
                write!(f, " -> {:?}", indirect.objects)?;
            }
            write!(f, "]")?;
        }
        if !self.unparsed.is_empty() {
            write!(f, " (unparsed: {:?})", self.unparsed)?;
        }
        Ok(())
    }
}
