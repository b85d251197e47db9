//! Lookup of verbs provided by individual objects.

use std::collections::BTreeMap;

use mudlex_foundation::{Alias, ObjectId};

use crate::grammar::VerbDefinition;

/// Source of object-local verb definitions.
///
/// Scopes only record *which* objects provide a verb alias. The grammar of
/// each local verb stays with the object, and is fetched through this trait
/// once the parser knows which objects are in reach.
pub trait VerbCatalog {
    /// Returns the definitions `object` provides for `alias`.
    fn definitions(&self, object: ObjectId, alias: &str) -> Vec<VerbDefinition>;
}

/// A catalog with no local verbs.
impl VerbCatalog for () {
    fn definitions(&self, _object: ObjectId, _alias: &str) -> Vec<VerbDefinition> {
        Vec::new()
    }
}

/// A fixed table of local verbs, for tools and tests that have no world.
#[derive(Clone, Debug, Default)]
pub struct StaticCatalog {
    entries: BTreeMap<(ObjectId, Alias), Vec<VerbDefinition>>,
}

impl StaticCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a definition for an object's verb alias.
    pub fn insert(&mut self, object: ObjectId, alias: &str, definition: VerbDefinition) {
        self.entries
            .entry((object, Alias::new(alias)))
            .or_default()
            .push(definition);
    }
}

impl VerbCatalog for StaticCatalog {
    fn definitions(&self, object: ObjectId, alias: &str) -> Vec<VerbDefinition> {
        self.entries
            .get(&(object, Alias::new(alias)))
            .cloned()
            .unwrap_or_default()
    }
}
