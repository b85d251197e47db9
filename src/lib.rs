//! mudlex - Command understanding for multiplayer text adventures
//!
//! This crate re-exports all layers of the mudlex system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: mudlex_runtime     — REPL, demo world, CLI
//! Layer 3: mudlex_parser      — Tokenizer, span matcher, sentence shapes, parser
//! Layer 2: mudlex_world       — Object arena, containment, alias propagation
//! Layer 1: mudlex_lexicon     — Word tables, lexical scopes, registry, grammars
//! Layer 0: mudlex_foundation  — Core types (ObjectId, Alias, Error)
//! ```

pub use mudlex_foundation as foundation;
pub use mudlex_lexicon as lexicon;
pub use mudlex_parser as parser;
pub use mudlex_runtime as runtime;
pub use mudlex_world as world;
