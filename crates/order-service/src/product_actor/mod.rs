//! # Product Collection
//!
//! The catalog. Products are looked up in batches by the order pipeline, which
//! snapshots each one into a [`LineItem`](crate::model::LineItem).
//!
//! ## Structure
//!
//! - [`entity`] - [`Document`](doc_store::Document) implementation for [`Product`]
//! - [`error`] - [`ProductError`]
//! - [`new()`] - Factory function that creates the collection and its client

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::Product;
use doc_store::{CollectionActor, CollectionClient};

/// Creates a new Product collection and its client.
pub fn new(buffer_size: usize) -> (CollectionActor<Product>, CollectionClient<Product>) {
    CollectionActor::new(buffer_size)
}
