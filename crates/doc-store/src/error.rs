//! # Store Errors
//!
//! Errors raised by the collection machinery itself. Document-level failures
//! (validation in `from_create`, rejected updates) travel boxed inside
//! [`StoreError::Document`] so that each domain client can map them onto its own enum.

/// Errors that can occur while talking to a collection.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Collection closed")]
    ActorClosed,
    #[error("Collection dropped response channel")]
    ActorDropped,
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Document error: {0}")]
    Document(Box<dyn std::error::Error + Send + Sync>),
}
