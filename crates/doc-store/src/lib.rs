//! # Doc Store
//!
//! An in-process document store built from actors. Each collection (customers,
//! products, orders, discount rules, …) is a [`CollectionActor`] that owns its documents
//! and answers requests arriving on a channel; callers hold cheap, cloneable
//! [`CollectionClient`] handles.
//!
//! ## Why actors for a store?
//!
//! - **Isolated state**: a collection's documents are touched by exactly one task, so no locks.
//! - **Independent collections**: a slow query on one collection never blocks another.
//! - **Uniform API**: insert, get, get-many, find and update work for any [`Document`].
//!
//! Further reading: [Actors with Tokio](https://ryhl.io/blog/actors-with-tokio/).
//!
//! ## Layers
//!
//! 1. **Document Layer** ([`Document`]): the record type, its payloads, filter and validation.
//! 2. **Runtime Layer** ([`CollectionActor`]): request processing.
//! 3. **Interface Layer** ([`CollectionClient`], [`StoreClient`]): typed access and error mapping.
//!
//! ```rust,ignore
//! let (actor, client) = CollectionActor::<Customer>::new(32);
//! tokio::spawn(actor.run());
//!
//! let id = client.insert(CustomerCreate { name: "Alice".into(), email: "a@example.com".into() }).await?;
//! let alice = client.get(id).await?;
//! ```
//!
//! ## Availability
//!
//! A collection stops when every client clone is dropped. Requests sent after that fail
//! with [`StoreError::ActorClosed`]; callers treat that (and [`StoreError::ActorDropped`])
//! as "store unavailable", distinct from "document not found".
//!
//! ## Testing
//!
//! [`mock::MockCollection`] scripts answers for a collection without running it.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod document;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use actor::CollectionActor;
pub use client::CollectionClient;
pub use client_trait::StoreClient;
pub use document::Document;
pub use error::StoreError;
pub use message::{Response, StoreRequest};
