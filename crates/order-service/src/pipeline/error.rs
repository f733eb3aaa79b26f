//! Error types for order placement.

use thiserror::Error;

/// Why an order was not placed. Every variant is terminal; nothing is retried.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PipelineError {
    /// The request is malformed. Raised before any lookup.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// The customer or a product does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The store could not answer.
    #[error("Lookup failed: {0}")]
    LookupFailure(String),
}

impl PipelineError {
    pub(crate) fn lookup(e: impl std::fmt::Display) -> Self {
        PipelineError::LookupFailure(e.to_string())
    }
}
