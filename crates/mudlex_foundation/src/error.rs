//! Error types for mudlex.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Parse failures are not errors: they are reported through parse statuses.
//! These errors cover configuration mistakes and object-model misuse.

use std::fmt;

use thiserror::Error;

use crate::entity::ObjectId;

/// The main error type for mudlex operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an object not found error.
    #[must_use]
    pub fn object_not_found(id: ObjectId) -> Self {
        Self::new(ErrorKind::ObjectNotFound(id))
    }

    /// Creates a stale object handle error.
    #[must_use]
    pub fn stale_object(id: ObjectId) -> Self {
        Self::new(ErrorKind::StaleObject(id))
    }

    /// Creates an error for an object that cannot hold other objects.
    #[must_use]
    pub fn not_a_carrier(id: ObjectId) -> Self {
        Self::new(ErrorKind::NotACarrier(id))
    }

    /// Creates an error for an object that cannot be contained.
    #[must_use]
    pub fn not_containable(id: ObjectId) -> Self {
        Self::new(ErrorKind::NotContainable(id))
    }

    /// Creates an error for a containment chain with no top-level owner.
    #[must_use]
    pub fn ownerless_containment(id: ObjectId) -> Self {
        Self::new(ErrorKind::OwnerlessContainment(id))
    }

    /// Creates an unsupported grammar error.
    #[must_use]
    pub fn unsupported_grammar(description: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsupportedGrammar(description.into()))
    }

    /// Returns true if this error signals a broken object-model invariant.
    ///
    /// Fatal errors indicate a data-model bug rather than bad input; callers
    /// must abort the surrounding operation instead of swallowing them.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self.kind, ErrorKind::OwnerlessContainment(_))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Object was not found in the arena.
    #[error("object not found: {0:?}")]
    ObjectNotFound(ObjectId),

    /// Object handle is stale (generation mismatch).
    #[error("stale object handle: {0:?}")]
    StaleObject(ObjectId),

    /// Object cannot hold other objects.
    #[error("object {0:?} cannot hold other objects")]
    NotACarrier(ObjectId),

    /// Object cannot be placed inside anything.
    #[error("object {0:?} cannot be placed inside another object")]
    NotContainable(ObjectId),

    /// Moving an object would make it contain itself.
    #[error("moving {object:?} into {destination:?} would create a containment cycle")]
    ContainmentCycle {
        /// The object being moved.
        object: ObjectId,
        /// The requested destination.
        destination: ObjectId,
    },

    /// A containment chain never reaches an area or a player.
    #[error("containment chain through {0:?} has no area or player at the top")]
    OwnerlessContainment(ObjectId),

    /// A grammar descriptor selects no sentence shape.
    #[error("unsupported grammar: {0}")]
    UnsupportedGrammar(String),

    /// An object does not carry the alias being removed.
    #[error("object {object:?} has no alias {alias:?}")]
    AliasNotFound {
        /// The object that was queried.
        object: ObjectId,
        /// The alias text.
        alias: String,
    },

    /// An alias normalized to nothing.
    #[error("invalid alias: {0:?}")]
    InvalidAlias(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation that failed.
    pub operation: Option<String>,
    /// Chain of objects walked before the failure.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the failing operation.
    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Adds a frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(operation) = &self.operation {
            write!(f, "during {operation}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  via {frame}")?;
            }
        }
        Ok(())
    }
}
