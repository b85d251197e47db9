//! REPL, demo world, and CLI for mudlex.
//!
//! This crate provides:
//! - [`Repl`] - Interactive read-parse-print loop
//! - [`Session`] - A world, a parser, and the player doing the typing
//! - [`demo`] - A small world for exercising alias propagation by hand

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod demo;
pub mod editor;
pub mod repl;
pub mod session;

pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use repl::Repl;
pub use session::Session;
