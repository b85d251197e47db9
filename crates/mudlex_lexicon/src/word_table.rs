//! Reference-counted alias tables.
//!
//! A [`WordTable`] maps each alias to the objects currently claiming it,
//! each with a use-count. The same object may register the same alias more
//! than once (for example when a name is re-added), so counts rather than
//! plain membership decide when a pair disappears.

use std::collections::BTreeMap;

use mudlex_foundation::{Alias, ObjectId, ObjectSet, normalized};

/// Alias → (object → use-count) table.
///
/// Invariants:
/// - an object is listed under an alias iff its count is at least one;
/// - an alias entry exists iff at least one object is listed under it.
///
/// `add` and `remove` report first insertion and last eviction so that an
/// owner can mirror each distinct pair into another table exactly once.
///
/// Methods taking `&str` normalize it first, so lookups ignore case and
/// spacing just as [`Alias`] equality does.
#[derive(Clone, Debug, Default)]
pub struct WordTable {
    entries: BTreeMap<Alias, BTreeMap<ObjectId, u32>>,
}

impl WordTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the count for `(alias, object)`.
    ///
    /// Returns true only when the pair is brand new.
    pub fn add(&mut self, alias: &Alias, object: ObjectId) -> bool {
        let counts = self.entries.entry(alias.clone()).or_default();
        let count = counts.entry(object).or_insert(0);
        *count += 1;
        *count == 1
    }

    /// Decrements the count for `(alias, object)`, evicting it at zero.
    ///
    /// Returns true only when this call evicted the pair. Removing a pair
    /// that is not present is a no-op.
    pub fn remove(&mut self, alias: &str, object: ObjectId) -> bool {
        let alias = normalized(alias);
        let Some(counts) = self.entries.get_mut(&*alias) else {
            return false;
        };
        let Some(count) = counts.get_mut(&object) else {
            return false;
        };

        *count -= 1;
        if *count > 0 {
            return false;
        }

        counts.remove(&object);
        if counts.is_empty() {
            self.entries.remove(&*alias);
        }
        true
    }

    /// Returns true if any object claims the alias.
    #[must_use]
    pub fn has(&self, alias: &str) -> bool {
        self.entries.contains_key(&*normalized(alias))
    }

    /// Returns every object claiming the alias.
    #[must_use]
    pub fn objects(&self, alias: &str) -> ObjectSet {
        self.entries
            .get(&*normalized(alias))
            .map(|counts| counts.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Returns the use-count for one `(alias, object)` pair.
    #[must_use]
    pub fn count(&self, alias: &str, object: ObjectId) -> u32 {
        self.entries
            .get(&*normalized(alias))
            .and_then(|counts| counts.get(&object))
            .copied()
            .unwrap_or(0)
    }

    /// Returns the summed use-count of every object under the alias.
    #[must_use]
    pub fn total(&self, alias: &str) -> u32 {
        self.entries
            .get(&*normalized(alias))
            .map_or(0, |counts| counts.values().sum())
    }

    /// Iterates over all aliases in the table, in alias order.
    pub fn aliases(&self) -> impl Iterator<Item = &Alias> {
        self.entries.keys()
    }

    /// Returns the aliases a given object currently holds in this table.
    #[must_use]
    pub fn aliases_of(&self, object: ObjectId) -> Vec<Alias> {
        self.entries
            .iter()
            .filter(|(_, counts)| counts.contains_key(&object))
            .map(|(alias, _)| alias.clone())
            .collect()
    }

    /// Returns the number of distinct aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of distinct `(alias, object)` pairs.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    /// Returns true if the table holds no aliases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Empties the table, returning each distinct pair once.
    pub fn clear(&mut self) -> Vec<(Alias, ObjectId)> {
        let entries = std::mem::take(&mut self.entries);
        entries
            .into_iter()
            .flat_map(|(alias, counts)| {
                counts
                    .into_keys()
                    .map(move |object| (alias.clone(), object))
            })
            .collect()
    }
}
