//! Grammar descriptors and sentence-shape selection.
//!
//! A [`GrammarDescriptor`] declares what a verb accepts: direct-object
//! support, indirect-object support, and the prepositions it understands.
//! Those three axes select exactly one of twelve [`SentenceShape`]s through
//! a fixed decision table. Combinations outside the table are configuration
//! errors and are rejected when a [`VerbDefinition`] is built.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use mudlex_foundation::{Alias, Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a grammatical slot may be filled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ObjectSupport {
    /// The slot is absent.
    #[default]
    No,
    /// The slot names an object resolved through scopes.
    Object,
    /// The slot takes free text, bound verbatim.
    Text,
}

/// Semantic role a preposition plays in a sentence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PrepositionRole {
    /// No particular role.
    None,
    /// Direction or recipient ("give coin to beggar").
    To,
    /// Instrument ("open door with key").
    With,
    /// Source ("take coin from chest").
    From,
    /// Placement on top of something.
    On,
    /// Placement inside something.
    In,
    /// Placement beneath something.
    Under,
    /// Possession ("key of the chest"); swaps direct and indirect bindings.
    Of,
}

impl PrepositionRole {
    /// Returns the item-placement role this preposition implies, if any.
    #[must_use]
    pub const fn placement(self) -> Option<Placement> {
        match self {
            Self::On => Some(Placement::On),
            Self::In => Some(Placement::In),
            Self::Under => Some(Placement::Under),
            Self::None | Self::To | Self::With | Self::From | Self::Of => None,
        }
    }

    /// Returns true if this role exchanges the direct and indirect bindings.
    #[must_use]
    pub const fn swaps_objects(self) -> bool {
        matches!(self, Self::Of)
    }
}

/// Where a placement command puts its direct object relative to the indirect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Placement {
    /// On top of.
    On,
    /// Inside.
    In,
    /// Underneath.
    Under,
}

/// The twelve legal verb shapes.
///
/// Names read left to right in sentence order: `VerbDirectPrepIndirect` is
/// "put (lamp) (in) (chest)". `Text` marks a free-text slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SentenceShape {
    /// `look`
    Verb,
    /// `take lamp`
    VerbDirect,
    /// `shout hello there`
    VerbText,
    /// `get up`
    VerbPrep,
    /// `look at lamp`
    VerbPrepIndirect,
    /// `say to bob`
    VerbPrepText,
    /// `turn lamp on`
    VerbDirectPrep,
    /// `put lamp in chest`
    VerbDirectPrepIndirect,
    /// `ask bob about dragons`
    VerbDirectPrepText,
    /// `sing ballad loudly`
    VerbTextPrep,
    /// `write hello on paper`
    VerbTextPrepIndirect,
    /// `set title to The Keep`
    VerbTextPrepText,
}

impl SentenceShape {
    /// Selects the shape for a combination of grammar axes.
    ///
    /// Returns `None` for combinations that have no shape: an indirect slot
    /// without any preposition to introduce it.
    #[must_use]
    pub const fn select(
        direct: ObjectSupport,
        has_preposition: bool,
        indirect: ObjectSupport,
    ) -> Option<Self> {
        use ObjectSupport::{No, Object, Text};

        match (direct, has_preposition, indirect) {
            (No, false, No) => Some(Self::Verb),
            (Object, false, No) => Some(Self::VerbDirect),
            (Text, false, No) => Some(Self::VerbText),
            (No, true, No) => Some(Self::VerbPrep),
            (No, true, Object) => Some(Self::VerbPrepIndirect),
            (No, true, Text) => Some(Self::VerbPrepText),
            (Object, true, No) => Some(Self::VerbDirectPrep),
            (Object, true, Object) => Some(Self::VerbDirectPrepIndirect),
            (Object, true, Text) => Some(Self::VerbDirectPrepText),
            (Text, true, No) => Some(Self::VerbTextPrep),
            (Text, true, Object) => Some(Self::VerbTextPrepIndirect),
            (Text, true, Text) => Some(Self::VerbTextPrepText),
            (_, false, Object | Text) => None,
        }
    }

    /// Direct-object support of this shape.
    #[must_use]
    pub const fn direct(self) -> ObjectSupport {
        match self {
            Self::Verb | Self::VerbPrep | Self::VerbPrepIndirect | Self::VerbPrepText => {
                ObjectSupport::No
            }
            Self::VerbDirect
            | Self::VerbDirectPrep
            | Self::VerbDirectPrepIndirect
            | Self::VerbDirectPrepText => ObjectSupport::Object,
            Self::VerbText
            | Self::VerbTextPrep
            | Self::VerbTextPrepIndirect
            | Self::VerbTextPrepText => ObjectSupport::Text,
        }
    }

    /// Indirect-object support of this shape.
    #[must_use]
    pub const fn indirect(self) -> ObjectSupport {
        match self {
            Self::VerbPrepIndirect | Self::VerbDirectPrepIndirect | Self::VerbTextPrepIndirect => {
                ObjectSupport::Object
            }
            Self::VerbPrepText | Self::VerbDirectPrepText | Self::VerbTextPrepText => {
                ObjectSupport::Text
            }
            _ => ObjectSupport::No,
        }
    }

    /// Returns true if this shape has a preposition slot.
    #[must_use]
    pub const fn has_preposition(self) -> bool {
        !matches!(self, Self::Verb | Self::VerbDirect | Self::VerbText)
    }

    /// Returns all twelve shapes.
    #[must_use]
    pub const fn all() -> [Self; 12] {
        [
            Self::Verb,
            Self::VerbDirect,
            Self::VerbText,
            Self::VerbPrep,
            Self::VerbPrepIndirect,
            Self::VerbPrepText,
            Self::VerbDirectPrep,
            Self::VerbDirectPrepIndirect,
            Self::VerbDirectPrepText,
            Self::VerbTextPrep,
            Self::VerbTextPrepIndirect,
            Self::VerbTextPrepText,
        ]
    }
}

/// The rule set describing what a verb accepts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GrammarDescriptor {
    /// Direct-object support.
    pub direct: ObjectSupport,
    /// Indirect-object support.
    pub indirect: ObjectSupport,
    /// Accepted prepositions and the role each one plays.
    pub prepositions: BTreeMap<Alias, PrepositionRole>,
}

impl GrammarDescriptor {
    /// Creates a grammar for a bare verb.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets direct-object support.
    #[must_use]
    pub fn with_direct(mut self, support: ObjectSupport) -> Self {
        self.direct = support;
        self
    }

    /// Sets indirect-object support.
    #[must_use]
    pub fn with_indirect(mut self, support: ObjectSupport) -> Self {
        self.indirect = support;
        self
    }

    /// Adds an accepted preposition.
    #[must_use]
    pub fn with_preposition(mut self, text: &str, role: PrepositionRole) -> Self {
        self.prepositions.insert(Alias::new(text), role);
        self
    }

    /// Returns the shape this grammar selects, if any.
    #[must_use]
    pub fn shape(&self) -> Option<SentenceShape> {
        SentenceShape::select(self.direct, !self.prepositions.is_empty(), self.indirect)
    }

    /// Returns the role of an accepted preposition.
    #[must_use]
    pub fn role_of(&self, preposition: &str) -> Option<PrepositionRole> {
        self.prepositions.get(preposition).copied()
    }

    /// Returns true if the preposition is accepted.
    #[must_use]
    pub fn accepts_preposition(&self, preposition: &str) -> bool {
        self.prepositions.contains_key(preposition)
    }
}

/// Identifier of the command a verb definition dispatches to.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CommandId(Arc<str>);

impl CommandId {
    /// Creates a command identifier.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommandId({})", self.0)
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommandId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A registered meaning of a verb alias: command, grammar, and help text.
///
/// The sentence shape is selected once, when the definition is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerbDefinition {
    command: CommandId,
    grammar: Arc<GrammarDescriptor>,
    shape: SentenceShape,
    help: Option<String>,
}

impl VerbDefinition {
    /// Builds a definition, selecting its sentence shape.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedGrammar` if the grammar selects no shape.
    pub fn new(command: impl Into<CommandId>, grammar: GrammarDescriptor) -> Result<Self> {
        let command = command.into();
        let Some(shape) = grammar.shape() else {
            return Err(Error::unsupported_grammar(format!(
                "{command}: indirect object ({:?}) declared without any preposition",
                grammar.indirect
            )));
        };
        Ok(Self {
            command,
            grammar: Arc::new(grammar),
            shape,
            help: None,
        })
    }

    /// Attaches help text.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// The command this definition dispatches to.
    #[must_use]
    pub fn command(&self) -> &CommandId {
        &self.command
    }

    /// The grammar descriptor.
    #[must_use]
    pub fn grammar(&self) -> &GrammarDescriptor {
        &self.grammar
    }

    /// The selected sentence shape.
    #[must_use]
    pub fn shape(&self) -> SentenceShape {
        self.shape
    }

    /// Help text, if any.
    #[must_use]
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
}

/// Registry tier a global verb is registered in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VerbTier {
    /// Available to everyone.
    Global,
    /// Available to builders.
    Builder,
    /// Available while editing.
    EditMode,
}

impl VerbTier {
    /// The priority interpretations from this tier carry.
    #[must_use]
    pub const fn priority(self) -> VerbPriority {
        match self {
            Self::Global => VerbPriority::Global,
            Self::Builder => VerbPriority::Builder,
            Self::EditMode => VerbPriority::EditMode,
        }
    }

    /// Tiers in lookup order, highest precedence first.
    #[must_use]
    pub const fn lookup_order() -> [Self; 3] {
        [Self::EditMode, Self::Builder, Self::Global]
    }
}

/// Ranking of competing interpretations of the same input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VerbPriority {
    /// The verb denotes nothing anywhere.
    Invalid,
    /// The verb exists but is not reachable from here.
    Unavailable,
    /// Registered in the global tier.
    Global,
    /// Provided by an object in the player's or area's scope.
    Local,
    /// Registered in the builder tier.
    Builder,
    /// Registered in the edit-mode tier.
    EditMode,
}
