//! Generational object arena.
//!
//! Slots are reused through a free list. Every reuse bumps the slot's
//! generation, so an [`ObjectId`] kept past its object's destruction is
//! detected as stale instead of silently naming the newcomer.

// Allow u64 to usize casts - we target 64-bit systems
#![allow(clippy::cast_possible_truncation)]

use mudlex_foundation::{Error, ObjectId, Result};

use crate::object::GameObject;

#[derive(Debug)]
struct Slot {
    /// Even generations are free, odd generations are alive.
    generation: u32,
    object: Option<GameObject>,
}

/// Owns every [`GameObject`] and hands out generational handles.
#[derive(Debug, Default)]
pub struct ObjectStore {
    slots: Vec<Slot>,
    free_list: Vec<u64>,
    live_count: usize,
}

impl ObjectStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an object, returning its handle.
    pub fn insert(&mut self, object: GameObject) -> ObjectId {
        self.live_count += 1;

        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.generation += 1;
            slot.object = Some(object);
            ObjectId::new(index, slot.generation)
        } else {
            let index = self.slots.len() as u64;
            self.slots.push(Slot {
                generation: 1,
                object: Some(object),
            });
            ObjectId::new(index, 1)
        }
    }

    /// Removes an object, freeing its slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale or was never issued.
    pub fn remove(&mut self, id: ObjectId) -> Result<GameObject> {
        self.validate(id)?;

        let slot = &mut self.slots[id.index as usize];
        let object = slot
            .object
            .take()
            .ok_or_else(|| Error::object_not_found(id))?;
        slot.generation += 1;
        self.free_list.push(id.index);
        self.live_count -= 1;
        Ok(object)
    }

    /// Checks that a handle names a live object.
    ///
    /// # Errors
    ///
    /// `StaleObject` on a generation mismatch, `ObjectNotFound` otherwise.
    pub fn validate(&self, id: ObjectId) -> Result<()> {
        let Some(slot) = self.slots.get(id.index as usize) else {
            return Err(Error::object_not_found(id));
        };

        if slot.generation != id.generation {
            return Err(Error::stale_object(id));
        }

        if slot.generation % 2 == 0 {
            return Err(Error::object_not_found(id));
        }

        Ok(())
    }

    /// Returns true if the handle names a live object.
    #[must_use]
    pub fn exists(&self, id: ObjectId) -> bool {
        self.validate(id).is_ok()
    }

    /// Borrows an object.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is not live.
    pub fn get(&self, id: ObjectId) -> Result<&GameObject> {
        self.validate(id)?;
        self.slots[id.index as usize]
            .object
            .as_ref()
            .ok_or_else(|| Error::object_not_found(id))
    }

    /// Mutably borrows an object.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is not live.
    pub fn get_mut(&mut self, id: ObjectId) -> Result<&mut GameObject> {
        self.validate(id)?;
        self.slots[id.index as usize]
            .object
            .as_mut()
            .ok_or_else(|| Error::object_not_found(id))
    }

    /// Number of live objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live_count
    }

    /// Returns true if no objects are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Iterates over live objects in index order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &GameObject)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.object
                .as_ref()
                .map(|object| (ObjectId::new(index as u64, slot.generation), object))
        })
    }
}
