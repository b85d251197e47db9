//! Object handles with generational indices.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Non-owning handle to an object in the world arena.
///
/// Scopes and the word registry store these handles, never the objects
/// themselves. The generation counter increments when an arena slot is
/// reused, so a handle to a destroyed object never aliases its successor.
///
/// Handles order by index then generation, which gives bound object sets a
/// stable iteration order.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjectId {
    /// Index into the object arena.
    pub index: u64,
    /// Generation counter for stale handle detection.
    pub generation: u32,
}

impl ObjectId {
    /// Creates a new handle with the given index and generation.
    #[must_use]
    pub const fn new(index: u64, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}
