//! # Document Trait
//!
//! The `Document` trait is the contract every stored record (Customer, Product, Order,
//! DiscountRule, …) implements so that a generic [`CollectionActor`](crate::CollectionActor)
//! can own it. It names the identifier, the insert and update payloads, the query filter,
//! and the error type, and provides the hooks the collection calls while processing requests.
//!
//! # Architecture Note
//! The collection loop is written *once* against this trait. Associated types keep every
//! collection honest: an `Order` collection only accepts `OrderCreate` payloads and only
//! answers `OrderFilter` queries.

use std::fmt::{Debug, Display};

/// Trait that any stored record must implement to be managed by a `CollectionActor`.
pub trait Document: Clone + Send + Sync + 'static {
    /// Identifier assigned by the collection on insert.
    /// Must be convertible from `u32` for automatic ID generation and ordered so that
    /// query results come back in insertion order.
    type Id: Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The payload required to insert a new document.
    type Create: Send + Sync + Debug;

    /// The payload applied to an existing document by an update request.
    type Update: Send + Sync + Debug;

    /// Query predicate for `find` requests. Use `()` when the collection is only
    /// ever looked up by id.
    type Filter: Send + Sync + Debug;

    /// The error type for this document.
    ///
    /// # Design Note: Error Granularity
    ///
    /// One error enum per collection, not one per request. Clients then deal with a
    /// single `OrderError` type, at the cost of each enum being the union of every
    /// failure the collection can produce.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the stored document from the assigned ID and the insert payload.
    /// Validation belongs here: a rejected payload never reaches the collection.
    fn from_create(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Apply an update payload in place.
    fn apply_update(&mut self, update: Self::Update) -> Result<(), Self::Error>;

    /// Whether this document satisfies a query filter.
    fn matches(&self, filter: &Self::Filter) -> bool;
}
