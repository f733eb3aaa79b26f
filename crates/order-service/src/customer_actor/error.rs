//! Error types for the Customer collection.

use thiserror::Error;

/// Errors that can occur during customer operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CustomerError {
    #[error("Customer not found: {0}")]
    NotFound(String),

    /// The registration payload was rejected.
    #[error("Customer validation error: {0}")]
    ValidationError(String),

    /// The customer collection could not be reached.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
