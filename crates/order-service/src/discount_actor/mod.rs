//! # Discount Rule Collection
//!
//! Discount rules are looked up by code. Rates are validated here, when a rule is
//! stored, so the discount engine can trust every rule it is handed.
//!
//! ## Structure
//!
//! - [`entity`] - [`Document`](doc_store::Document) implementation for [`DiscountRule`]
//! - [`error`] - [`DiscountError`]
//! - [`new()`] - Factory function that creates the collection and its client

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::DiscountRule;
use doc_store::{CollectionActor, CollectionClient};

/// Creates a new discount rule collection and its client.
pub fn new(buffer_size: usize) -> (CollectionActor<DiscountRule>, CollectionClient<DiscountRule>) {
    CollectionActor::new(buffer_size)
}
