//! Error types for the discount rule collection.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DiscountError {
    #[error("Discount rule not found: {0}")]
    NotFound(String),

    #[error("Discount code must not be empty")]
    EmptyCode,

    /// Rates are fractions in `[0, 1]`.
    #[error("Invalid rate {rate} for discount {code}")]
    InvalidRate { code: String, rate: f64 },

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
