//! Command parser for mudlex.
//!
//! Turns a line of player input like "put the lamp under the bed" into a
//! structured [`ParseResult`], resolving words against the player's and
//! area's [`LexicalScope`](mudlex_lexicon::LexicalScope)s.
//!
//! # Architecture
//!
//! ```text
//! "put the lamp under the bed"
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   TOKENIZER     │  → [put, the, lamp, under, the, bed]
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ VERB SPAN       │  → "put": edit-mode, builder, global and local meanings
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ SENTENCE SHAPE  │  → VerbDirectPrepIndirect: [the lamp] under [the bed]
//! │ MATCHING        │
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ RANKING         │  → (priority, status, fewest unparsed words)
//! └─────────────────┘
//!          │
//!          ▼
//!   Resolved(result) or Ambiguous(results)
//! ```
//!
//! # Modules
//!
//! - [`tokenizer`] - Split input into normalized tokens
//! - [`span`] - Widest-span alias matching with filler words
//! - [`shape`] - The twelve sentence shapes
//! - [`result`] - Parse statuses and results
//! - [`parser`] - Verb meanings, candidate generation, and ranking
//! - [`config`] - Parser configuration and actor privileges

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod parser;
pub mod result;
pub mod shape;
pub mod span;
pub mod tokenizer;

pub use config::{Actor, ParserConfig};
pub use parser::{ParseContext, ParseOutcome, Parser};
pub use result::{Binding, ParseResult, ParseStatus, SentenceMatch, VerbBinding};
pub use shape::{MatchSentence, SlotMatcher, SlotOutcome};
pub use span::{SpanMatch, SpanMatcher};
pub use tokenizer::{Token, TokenRange, TokenSequence};
