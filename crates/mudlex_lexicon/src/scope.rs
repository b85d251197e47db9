//! Lexical scopes.
//!
//! A scope holds the nouns and verbs resolvable from one vantage point: a
//! player's inventory or an area. Each distinct `(alias, object)` pair a
//! scope holds is mirrored into the [`WordRegistry`] exactly once.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace};

use mudlex_foundation::{Alias, ObjectId, ObjectSet};

use crate::registry::WordRegistry;
use crate::word_table::WordTable;

/// Noun and verb tables for one player or area.
///
/// Each table has its own lock. Mirroring into the registry happens while
/// the table lock is held, so locks are always taken table first, registry
/// second. Lookups and removals accept any casing and spacing.
pub struct LexicalScope {
    owner: ObjectId,
    nouns: Mutex<WordTable>,
    verbs: Mutex<WordTable>,
    registry: Arc<WordRegistry>,
}

impl LexicalScope {
    /// Creates an empty scope owned by a player or area.
    #[must_use]
    pub fn new(owner: ObjectId, registry: Arc<WordRegistry>) -> Self {
        Self {
            owner,
            nouns: Mutex::new(WordTable::new()),
            verbs: Mutex::new(WordTable::new()),
            registry,
        }
    }

    /// The player or area that owns this scope.
    #[must_use]
    pub fn owner(&self) -> ObjectId {
        self.owner
    }

    /// The registry this scope mirrors into.
    #[must_use]
    pub fn registry(&self) -> &Arc<WordRegistry> {
        &self.registry
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Adds a noun alias for an object. Returns true on first insertion.
    pub fn add_noun(&self, alias: &Alias, object: ObjectId) -> bool {
        let mut nouns = self.nouns.lock();
        let inserted = nouns.add(alias, object);
        if inserted {
            self.registry.mirror_noun_added(alias, object);
            debug!(scope = %self.owner, %alias, %object, "noun entered scope");
        }
        inserted
    }

    /// Removes one use of a noun alias. Returns true on last eviction.
    pub fn remove_noun(&self, alias: &str, object: ObjectId) -> bool {
        let mut nouns = self.nouns.lock();
        let evicted = nouns.remove(alias, object);
        if evicted {
            self.registry.mirror_noun_removed(alias, object);
            debug!(scope = %self.owner, alias, %object, "noun left scope");
        }
        evicted
    }

    /// Adds a verb alias for an object. Returns true on first insertion.
    pub fn add_verb(&self, alias: &Alias, object: ObjectId) -> bool {
        let mut verbs = self.verbs.lock();
        let inserted = verbs.add(alias, object);
        if inserted {
            self.registry.mirror_verb_added(alias, object);
            debug!(scope = %self.owner, %alias, %object, "verb entered scope");
        }
        inserted
    }

    /// Removes one use of a verb alias. Returns true on last eviction.
    pub fn remove_verb(&self, alias: &str, object: ObjectId) -> bool {
        let mut verbs = self.verbs.lock();
        let evicted = verbs.remove(alias, object);
        if evicted {
            self.registry.mirror_verb_removed(alias, object);
            debug!(scope = %self.owner, alias, %object, "verb left scope");
        }
        evicted
    }

    /// Drops every registration this scope holds, returning how many pairs
    /// were released.
    pub fn release(&self) -> usize {
        let mut released = 0;
        {
            let mut nouns = self.nouns.lock();
            for (alias, object) in nouns.clear() {
                self.registry.mirror_noun_removed(alias.as_str(), object);
                released += 1;
            }
        }
        {
            let mut verbs = self.verbs.lock();
            for (alias, object) in verbs.clear() {
                self.registry.mirror_verb_removed(alias.as_str(), object);
                released += 1;
            }
        }
        if released > 0 {
            debug!(scope = %self.owner, released, "scope released registrations");
        }
        released
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Returns true if some object in scope claims the noun alias.
    #[must_use]
    pub fn has_noun(&self, alias: &str) -> bool {
        let found = self.nouns.lock().has(alias);
        trace!(scope = %self.owner, alias, found, "scope noun lookup");
        found
    }

    /// Returns true if some object in scope claims the verb alias.
    #[must_use]
    pub fn has_verb(&self, alias: &str) -> bool {
        self.verbs.lock().has(alias)
    }

    /// Returns the objects in scope claiming the noun alias.
    #[must_use]
    pub fn nouns(&self, alias: &str) -> ObjectSet {
        self.nouns.lock().objects(alias)
    }

    /// Returns the objects in scope providing the verb alias.
    #[must_use]
    pub fn verbs(&self, alias: &str) -> ObjectSet {
        self.verbs.lock().objects(alias)
    }

    /// Returns the use-count of one noun pair.
    #[must_use]
    pub fn noun_count(&self, alias: &str, object: ObjectId) -> u32 {
        self.nouns.lock().count(alias, object)
    }

    /// Returns the use-count of one verb pair.
    #[must_use]
    pub fn verb_count(&self, alias: &str, object: ObjectId) -> u32 {
        self.verbs.lock().count(alias, object)
    }

    /// Returns every noun alias currently in scope.
    #[must_use]
    pub fn noun_aliases(&self) -> Vec<Alias> {
        self.nouns.lock().aliases().cloned().collect()
    }

    /// Returns every verb alias currently in scope.
    #[must_use]
    pub fn verb_aliases(&self) -> Vec<Alias> {
        self.verbs.lock().aliases().cloned().collect()
    }

    /// Returns true if neither table holds anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nouns.lock().is_empty() && self.verbs.lock().is_empty()
    }
}

impl Drop for LexicalScope {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for LexicalScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexicalScope")
            .field("owner", &self.owner)
            .field("nouns", &self.nouns.lock().pair_count())
            .field("verbs", &self.verbs.lock().pair_count())
            .finish_non_exhaustive()
    }
}
