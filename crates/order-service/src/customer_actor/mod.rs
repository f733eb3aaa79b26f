//! # Customer Collection
//!
//! Customers are only ever looked up by id: the order pipeline checks that the
//! customer exists, and reminders read the name and email to address the email.
//!
//! ## Structure
//!
//! - [`entity`] - [`Document`](doc_store::Document) implementation for [`Customer`]
//! - [`error`] - [`CustomerError`]
//! - [`new()`] - Factory function that creates the collection and its client

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::Customer;
use doc_store::{CollectionActor, CollectionClient};

/// Creates a new Customer collection and its client.
pub fn new(buffer_size: usize) -> (CollectionActor<Customer>, CollectionClient<Customer>) {
    CollectionActor::new(buffer_size)
}
