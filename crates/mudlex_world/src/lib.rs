//! Object model for mudlex.
//!
//! This crate provides:
//! - [`ObjectStore`] - Generational arena of game objects
//! - [`GameObject`] and [`ObjectKind`] - The closed set of object kinds
//! - [`Nameable`], [`Containable`], [`Carrier`] - Capability traits
//! - [`World`] - Containment plus alias propagation into lexical scopes
//!
//! Areas and players own lexical scopes. Moving an object updates the scope
//! of whichever area or player ends up enclosing it.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod object;
pub mod store;
pub mod world;

pub use object::{
    Carrier, Containable, ContentVisibility, GameObject, LocalVerb, Nameable, ObjectKind,
};
pub use store::ObjectStore;
pub use world::World;
