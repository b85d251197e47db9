//! The global word registry.
//!
//! One registry is shared (via `Arc`) by every lexical scope of a world. It
//! holds the three verb tiers populated at startup, and a world-wide mirror
//! of every noun and verb alias that some scope currently holds. The mirror
//! is what separates "no such word" from "not here".

use std::collections::BTreeMap;
use std::fmt;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace, warn};

use mudlex_foundation::{Alias, Error, ErrorKind, ObjectId, ObjectSet, Result, normalized};

use crate::grammar::{VerbDefinition, VerbTier};
use crate::word_table::WordTable;

type TierTable = BTreeMap<Alias, Vec<VerbDefinition>>;

/// Process-wide vocabulary context for one game world.
///
/// Lookups accept any casing and spacing; text is normalized the same way
/// [`Alias::new`] does before it is matched.
#[derive(Default)]
pub struct WordRegistry {
    tiers: RwLock<BTreeMap<VerbTier, TierTable>>,
    nouns: Mutex<WordTable>,
    verbs: Mutex<WordTable>,
}

impl WordRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Verb tiers
    // =========================================================================

    /// Registers a verb definition in a tier.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAlias` if the alias is blank.
    pub fn register_verb(&self, tier: VerbTier, alias: &str, definition: VerbDefinition) -> Result<()> {
        let alias = Alias::new(alias);
        if alias.is_empty() {
            warn!(?tier, command = %definition.command(), "refusing blank verb alias");
            return Err(Error::new(ErrorKind::InvalidAlias(String::new())));
        }

        debug!(
            ?tier,
            %alias,
            command = %definition.command(),
            shape = ?definition.shape(),
            "registered verb"
        );
        self.tiers
            .write()
            .entry(tier)
            .or_default()
            .entry(alias)
            .or_default()
            .push(definition);
        Ok(())
    }

    /// Returns every definition of an alias in one tier, in registration order.
    #[must_use]
    pub fn tier_definitions(&self, tier: VerbTier, alias: &str) -> Vec<VerbDefinition> {
        self.tiers
            .read()
            .get(&tier)
            .and_then(|table| table.get(&*normalized(alias)))
            .cloned()
            .unwrap_or_default()
    }

    /// Returns true if the tier defines the alias.
    #[must_use]
    pub fn has_tier_verb(&self, tier: VerbTier, alias: &str) -> bool {
        self.tiers
            .read()
            .get(&tier)
            .is_some_and(|table| table.contains_key(&*normalized(alias)))
    }

    /// Returns help text for an alias, highest tier first.
    #[must_use]
    pub fn help(&self, alias: &str) -> Vec<(VerbTier, String)> {
        let alias = normalized(alias);
        let tiers = self.tiers.read();
        VerbTier::lookup_order()
            .into_iter()
            .filter_map(|tier| {
                tiers
                    .get(&tier)
                    .and_then(|table| table.get(&*alias))
                    .map(|defs| (tier, defs))
            })
            .flat_map(|(tier, defs)| {
                defs.iter()
                    .filter_map(move |def| def.help().map(|text| (tier, text.to_string())))
            })
            .collect()
    }

    /// Returns every alias defined in a tier.
    #[must_use]
    pub fn tier_aliases(&self, tier: VerbTier) -> Vec<Alias> {
        self.tiers
            .read()
            .get(&tier)
            .map(|table| table.keys().cloned().collect())
            .unwrap_or_default()
    }

    // =========================================================================
    // World-wide mirror
    // =========================================================================

    pub(crate) fn mirror_noun_added(&self, alias: &Alias, object: ObjectId) {
        self.nouns.lock().add(alias, object);
    }

    pub(crate) fn mirror_noun_removed(&self, alias: &str, object: ObjectId) {
        self.nouns.lock().remove(alias, object);
    }

    pub(crate) fn mirror_verb_added(&self, alias: &Alias, object: ObjectId) {
        self.verbs.lock().add(alias, object);
    }

    pub(crate) fn mirror_verb_removed(&self, alias: &str, object: ObjectId) {
        self.verbs.lock().remove(alias, object);
    }

    /// Returns true if any object anywhere claims the noun alias.
    #[must_use]
    pub fn has_noun(&self, alias: &str) -> bool {
        let found = self.nouns.lock().has(alias);
        trace!(alias, found, "registry noun lookup");
        found
    }

    /// Returns true if any tier defines the verb or any object claims it.
    #[must_use]
    pub fn has_verb(&self, alias: &str) -> bool {
        let alias = normalized(alias);
        let in_tiers = self
            .tiers
            .read()
            .values()
            .any(|table| table.contains_key(&*alias));
        in_tiers || self.verbs.lock().has(&alias)
    }

    /// Returns every object in the world claiming the noun alias, ignoring scope.
    #[must_use]
    pub fn noun_objects(&self, alias: &str) -> ObjectSet {
        self.nouns.lock().objects(alias)
    }

    /// Returns every object in the world claiming the verb alias.
    #[must_use]
    pub fn verb_objects(&self, alias: &str) -> ObjectSet {
        self.verbs.lock().objects(alias)
    }

    /// Returns the noun use-count for an alias, summed over objects.
    #[must_use]
    pub fn noun_count(&self, alias: &str) -> u32 {
        self.nouns.lock().total(alias)
    }

    /// Returns the verb use-count for an alias, summed over objects.
    #[must_use]
    pub fn verb_count(&self, alias: &str) -> u32 {
        self.verbs.lock().total(alias)
    }

    /// Returns the noun use-count for one `(alias, object)` pair.
    #[must_use]
    pub fn noun_pair_count(&self, alias: &str, object: ObjectId) -> u32 {
        self.nouns.lock().count(alias, object)
    }

    /// Returns a snapshot of registry sizes.
    #[must_use]
    pub fn stats(&self) -> RegistryStats {
        let (noun_aliases, noun_pairs) = {
            let nouns = self.nouns.lock();
            (nouns.len(), nouns.pair_count())
        };
        let (verb_aliases, verb_pairs) = {
            let verbs = self.verbs.lock();
            (verbs.len(), verbs.pair_count())
        };
        let tiers = self.tiers.read();
        let tier_aliases = VerbTier::lookup_order()
            .into_iter()
            .map(|tier| (tier, tiers.get(&tier).map_or(0, BTreeMap::len)))
            .collect();
        let definitions = tiers
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum();

        RegistryStats {
            noun_aliases,
            noun_pairs,
            verb_aliases,
            verb_pairs,
            tier_aliases,
            definitions,
        }
    }

    /// Clears the tiers and the world-wide mirror.
    ///
    /// Release (or drop) every [`LexicalScope`](crate::LexicalScope) sharing
    /// this registry first. A scope that still holds a pair only mirrors it
    /// again once its own count falls to zero and rises anew, so until then
    /// the registry misses that pair.
    pub fn reset(&self) {
        self.tiers.write().clear();
        let live = self.nouns.lock().clear().len() + self.verbs.lock().clear().len();
        if live > 0 {
            warn!(live, "registry reset while scopes still hold pairs");
        }
        debug!("registry reset");
    }
}

impl fmt::Debug for WordRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordRegistry")
            .field("stats", &self.stats())
            .finish()
    }
}

/// Size snapshot of a [`WordRegistry`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistryStats {
    /// Distinct noun aliases in use.
    pub noun_aliases: usize,
    /// Distinct `(noun alias, object)` pairs.
    pub noun_pairs: usize,
    /// Distinct verb aliases claimed by objects.
    pub verb_aliases: usize,
    /// Distinct `(verb alias, object)` pairs.
    pub verb_pairs: usize,
    /// Alias count per tier, highest tier first.
    pub tier_aliases: Vec<(VerbTier, usize)>,
    /// Total verb definitions across tiers.
    pub definitions: usize,
}

impl fmt::Display for RegistryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "nouns: {} aliases / {} pairs",
            self.noun_aliases, self.noun_pairs
        )?;
        writeln!(
            f,
            "verbs: {} aliases / {} pairs",
            self.verb_aliases, self.verb_pairs
        )?;
        for (tier, count) in &self.tier_aliases {
            writeln!(f, "{tier:?}: {count} aliases")?;
        }
        write!(f, "definitions: {}", self.definitions)
    }
}
