//! Core types for mudlex.
//!
//! This crate provides:
//! - [`ObjectId`] - Generational, non-owning object handles
//! - [`Alias`] - Case-insensitive alias keys
//! - [`ObjectSet`] - Persistent ordered sets of object handles
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod alias;
pub mod collections;
pub mod entity;
pub mod error;

pub use alias::{Alias, normalize, normalized};
pub use collections::ObjectSet;
pub use entity::ObjectId;
pub use error::{Error, ErrorContext, ErrorKind};

/// Result type alias using the mudlex [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
