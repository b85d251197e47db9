//! Persistent object sets with structural sharing.
//!
//! A thin wrapper around `im::OrdSet`, so that bound object sets can be
//! shared between competing parse candidates without copying.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::entity::ObjectId;

/// Ordered set of object handles.
///
/// Cloning is O(1). Iteration is in handle order, which keeps parse output
/// deterministic regardless of registration order.
#[derive(Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjectSet(im::OrdSet<ObjectId>);

impl ObjectSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self(im::OrdSet::new())
    }

    /// Creates a set holding exactly one object.
    #[must_use]
    pub fn unit(id: ObjectId) -> Self {
        Self(im::OrdSet::unit(id))
    }

    /// Returns the number of objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the set contains the object.
    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.0.contains(&id)
    }

    /// Inserts an object. Returns true if it was not already present.
    pub fn insert(&mut self, id: ObjectId) -> bool {
        self.0.insert(id).is_none()
    }

    /// Removes an object. Returns true if it was present.
    pub fn remove(&mut self, id: ObjectId) -> bool {
        self.0.remove(&id).is_some()
    }

    /// Returns a new set that is the union of this set and another.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self(self.0.clone().union(other.0.clone()))
    }

    /// Returns the only object in the set, if there is exactly one.
    ///
    /// Callers use this to tell a resolved binding from one that still needs
    /// disambiguation ("which ring?").
    #[must_use]
    pub fn single(&self) -> Option<ObjectId> {
        if self.0.len() == 1 {
            self.0.get_min().copied()
        } else {
            None
        }
    }

    /// Returns the lowest handle in the set.
    #[must_use]
    pub fn first(&self) -> Option<ObjectId> {
        self.0.get_min().copied()
    }

    /// Returns an iterator over the objects in handle order.
    pub fn iter(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Debug for ObjectSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.0.iter()).finish()
    }
}

impl Hash for ObjectSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for id in self.iter() {
            id.hash(state);
        }
    }
}

impl FromIterator<ObjectId> for ObjectSet {
    fn from_iter<I: IntoIterator<Item = ObjectId>>(iter: I) -> Self {
        Self(im::OrdSet::from_iter(iter))
    }
}

impl Extend<ObjectId> for ObjectSet {
    fn extend<I: IntoIterator<Item = ObjectId>>(&mut self, iter: I) {
        for id in iter {
            self.0.insert(id);
        }
    }
}
