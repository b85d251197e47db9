//! Vocabulary layer for mudlex.
//!
//! This crate provides:
//! - [`WordTable`] - Reference-counted alias → object tables
//! - [`LexicalScope`] - Noun and verb tables for one player or area
//! - [`WordRegistry`] - Verb tiers and the world-wide alias mirror
//! - [`GrammarDescriptor`] - What a verb accepts, and the [`SentenceShape`] it selects
//! - [`VerbCatalog`] - Access to verbs provided by individual objects
//!
//! Scopes and the registry store only [`ObjectId`](mudlex_foundation::ObjectId)
//! handles; they never own game objects.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod catalog;
pub mod grammar;
pub mod registry;
pub mod scope;
pub mod word_table;

pub use catalog::{StaticCatalog, VerbCatalog};
pub use grammar::{
    CommandId, GrammarDescriptor, ObjectSupport, Placement, PrepositionRole, SentenceShape,
    VerbDefinition, VerbPriority, VerbTier,
};
pub use registry::{RegistryStats, WordRegistry};
pub use scope::LexicalScope;
pub use word_table::WordTable;
