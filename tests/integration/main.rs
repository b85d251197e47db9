//! Cross-layer integration tests for mudlex
//!
//! Tests that verify correct interaction between multiple crates.

mod session_flow;
