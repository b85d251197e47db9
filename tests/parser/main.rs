//! Integration tests for Layer 3: Parser
//!
//! Tests for the parsing pipeline:
//! - Tokenization
//! - Sentence shapes
//! - Verb meanings and ranking
//! - Parsing against a live world

mod ranking;
