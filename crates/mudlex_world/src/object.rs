//! Game objects and their capabilities.
//!
//! The set of object kinds is closed. Behaviour that differs between kinds
//! is expressed through three capability traits rather than one large
//! interface: [`Nameable`] for aliases, [`Containable`] for having a
//! container, and [`Carrier`] for holding other objects.

use std::sync::Arc;

use mudlex_foundation::{Alias, ObjectId};
use mudlex_lexicon::{LexicalScope, VerbDefinition};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The closed set of object kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ObjectKind {
    /// A location. Owns a scope; never contained.
    Area,
    /// A player character. Owns a scope for its inventory.
    Player,
    /// A non-player character. Its belongings are hidden from the world.
    Creature,
    /// A plain portable thing.
    Item,
    /// A thing that holds other things in plain view.
    Container,
    /// Scenery that may hold things (a shelf, an altar).
    Feature,
    /// A passage between areas.
    Exit,
}

impl ObjectKind {
    /// Returns true if objects of this kind own a lexical scope.
    #[must_use]
    pub const fn owns_scope(self) -> bool {
        matches!(self, Self::Area | Self::Player)
    }

    /// How the contents of this kind are seen, or `None` if it holds nothing.
    #[must_use]
    pub const fn visibility(self) -> Option<ContentVisibility> {
        match self {
            Self::Area | Self::Player => Some(ContentVisibility::Owner),
            Self::Container | Self::Feature => Some(ContentVisibility::Propagate),
            Self::Creature => Some(ContentVisibility::Opaque),
            Self::Item | Self::Exit => None,
        }
    }

    /// Returns true if objects of this kind may be placed inside a carrier.
    #[must_use]
    pub const fn is_containable(self) -> bool {
        !matches!(self, Self::Area)
    }
}

/// Where a carrier's contents become resolvable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ContentVisibility {
    /// Contents register in the carrier's own scope.
    Owner,
    /// Contents register wherever the carrier itself is registered.
    Propagate,
    /// Contents register nowhere.
    Opaque,
}

/// A verb alias an object provides, with its grammar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalVerb {
    /// The alias players type.
    pub alias: Alias,
    /// What the alias means when this object provides it.
    pub definition: VerbDefinition,
}

/// Objects players can refer to by name.
pub trait Nameable {
    /// Noun aliases, one entry per registration.
    fn noun_aliases(&self) -> &[Alias];

    /// Verb aliases with their definitions, one entry per registration.
    fn verb_aliases(&self) -> &[LocalVerb];
}

/// Objects that can sit inside a carrier.
pub trait Containable {
    /// The carrier currently holding this object.
    fn container(&self) -> Option<ObjectId>;
}

/// Objects that hold other objects.
pub trait Carrier {
    /// Objects directly inside this one.
    fn contents(&self) -> &[ObjectId];

    /// How the contents are seen.
    fn content_visibility(&self) -> ContentVisibility;

    /// The scope this carrier owns, if it is a top-level owner.
    fn owned_scope(&self) -> Option<&Arc<LexicalScope>>;
}

/// One object in the world arena.
#[derive(Debug)]
pub struct GameObject {
    kind: ObjectKind,
    name: String,
    pub(crate) nouns: Vec<Alias>,
    pub(crate) verbs: Vec<LocalVerb>,
    pub(crate) container: Option<ObjectId>,
    pub(crate) contents: Vec<ObjectId>,
    pub(crate) scope: Option<Arc<LexicalScope>>,
}

impl GameObject {
    pub(crate) fn new(kind: ObjectKind, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            nouns: Vec::new(),
            verbs: Vec::new(),
            container: None,
            contents: Vec::new(),
            scope: None,
        }
    }

    /// The object's kind.
    #[must_use]
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the carrier view of this object, if its kind holds things.
    #[must_use]
    pub fn as_carrier(&self) -> Option<&dyn Carrier> {
        self.kind.visibility().map(|_| self as &dyn Carrier)
    }

    /// Returns the containable view of this object, if its kind can be held.
    #[must_use]
    pub fn as_containable(&self) -> Option<&dyn Containable> {
        self.kind.is_containable().then_some(self as &dyn Containable)
    }
}

impl Nameable for GameObject {
    fn noun_aliases(&self) -> &[Alias] {
        &self.nouns
    }

    fn verb_aliases(&self) -> &[LocalVerb] {
        &self.verbs
    }
}

impl Containable for GameObject {
    fn container(&self) -> Option<ObjectId> {
        self.container
    }
}

impl Carrier for GameObject {
    fn contents(&self) -> &[ObjectId] {
        &self.contents
    }

    fn content_visibility(&self) -> ContentVisibility {
        self.kind.visibility().unwrap_or(ContentVisibility::Opaque)
    }

    fn owned_scope(&self) -> Option<&Arc<LexicalScope>> {
        self.scope.as_ref()
    }
}
