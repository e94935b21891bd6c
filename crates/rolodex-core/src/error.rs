//! Error types for the core library.

use thiserror::Error;

use crate::contacts::{ContactId, ValidationError};

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// One or more contact fields failed validation.
    #[error("Validation failed: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    /// A position argument was outside the current sequence.
    #[error("Position {position} is out of bounds (len {len})")]
    Index {
        /// Requested position.
        position: usize,
        /// Length of the sequence at the time of the call.
        len: usize,
    },

    /// Every id above the newest contact is taken.
    #[error("No contact ids left above the newest contact")]
    IdsExhausted,

    /// No contact carries the given id.
    #[error("Contact not found: {0}")]
    NotFound(ContactId),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Storage backend refused the operation.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl Error {
    /// Returns true if the error is a user-correctable validation failure.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns the validation failures carried by this error, if any.
    #[must_use]
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::Validation(errors) => errors,
            _ => &[],
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ValidationError::message)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
