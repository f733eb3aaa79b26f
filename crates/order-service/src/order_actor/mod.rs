//! # Order Collection
//!
//! Stores placed orders and answers the two queries the service needs: every
//! order in a status (the reminder sweep enumerates `pending` orders) and a
//! customer's orders in a status (the reminder email lists the customer's
//! pending products).
//!
//! ## Structure
//!
//! - [`entity`] - [`Document`](doc_store::Document) implementation for [`Order`]
//! - [`error`] - [`OrderError`]
//! - [`new()`] - Factory function that creates the collection and its client
//!
//! ## Status transitions
//!
//! `pending` may move to `paid` or `cancelled`. Both are terminal: any further
//! transition is rejected with [`OrderError::InvalidTransition`].

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::Order;
use doc_store::{CollectionActor, CollectionClient};

/// Creates a new Order collection and its client.
pub fn new(buffer_size: usize) -> (CollectionActor<Order>, CollectionClient<Order>) {
    CollectionActor::new(buffer_size)
}
