//! # Collection Actor
//!
//! This module defines the `CollectionActor`, the server half of a collection. It owns
//! the documents and the receiving end of the request channel, and processes requests
//! one at a time, so the store needs no lock.

use crate::client::CollectionClient;
use crate::document::Document;
use crate::error::StoreError;
use crate::message::StoreRequest;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that owns one collection of documents.
///
/// **Concurrency Model**:
/// Each collection runs in its own Tokio task and handles its requests sequentially.
/// Many collections run in parallel; a slow query on `orders` never blocks `customers`.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `CollectionActor::new()` to get the actor and its client.
/// 2.  **Run**: Spawn `actor.run()` in a background task.
/// 3.  **Use**: Clone the client freely; dropping every clone stops the actor.
///
/// ```rust,ignore
/// let (actor, client) = CollectionActor::<Customer>::new(32);
/// tokio::spawn(actor.run());
/// let id = client.insert(CustomerCreate { name, email }).await?;
/// ```
///
/// # Implementation Details
///
/// Documents live in a `BTreeMap` keyed by id. Ids come from a `u32` counter starting
/// at 1, so iteration order (and therefore `find` result order) is insertion order.
///
/// * **Insert**: assigns the next id, runs `Document::from_create`, stores the result.
/// * **Get**: clone of the document, or `None`.
/// * **GetMany**: clones of the documents that exist, in the order the ids were given.
///   Missing ids are skipped; repeated ids yield repeated documents.
/// * **Find**: clones of every document whose `matches` accepts the filter.
/// * **Update**: runs `Document::apply_update` and returns the new state.
pub struct CollectionActor<T: Document> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    documents: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: Document> CollectionActor<T> {
    /// Creates a new `CollectionActor` and its associated `CollectionClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; when it is full, callers
    /// wait for space.
    pub fn new(buffer_size: usize) -> (Self, CollectionClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            documents: BTreeMap::new(),
            next_id: 1,
        };
        let client = CollectionClient::new(sender);
        (actor, client)
    }

    /// Runs the request loop until every client has been dropped.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "Order" instead of "order_service::model::order::Order")
        let collection = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(collection, "Collection started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Insert { params, respond_to } => {
                    debug!(collection, ?params, "Insert");
                    let id = T::Id::from(self.next_id);

                    match T::from_create(id.clone(), params) {
                        Ok(document) => {
                            self.next_id += 1;
                            self.documents.insert(id.clone(), document);
                            info!(collection, %id, size = self.documents.len(), "Inserted");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(collection, error = %e, "Insert rejected");
                            let _ = respond_to.send(Err(StoreError::Document(Box::new(e))));
                        }
                    }
                }
                StoreRequest::Get { id, respond_to } => {
                    let document = self.documents.get(&id).cloned();
                    debug!(collection, %id, found = document.is_some(), "Get");
                    let _ = respond_to.send(Ok(document));
                }
                StoreRequest::GetMany { ids, respond_to } => {
                    let found: Vec<T> = ids
                        .iter()
                        .filter_map(|id| self.documents.get(id).cloned())
                        .collect();
                    debug!(collection, requested = ids.len(), found = found.len(), "GetMany");
                    let _ = respond_to.send(Ok(found));
                }
                StoreRequest::Find { filter, respond_to } => {
                    let found: Vec<T> = self
                        .documents
                        .values()
                        .filter(|document| document.matches(&filter))
                        .cloned()
                        .collect();
                    debug!(collection, ?filter, found = found.len(), "Find");
                    let _ = respond_to.send(Ok(found));
                }
                StoreRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(collection, %id, ?update, "Update");
                    if let Some(document) = self.documents.get_mut(&id) {
                        if let Err(e) = document.apply_update(update) {
                            warn!(collection, %id, error = %e, "Update rejected");
                            let _ = respond_to.send(Err(StoreError::Document(Box::new(e))));
                            continue;
                        }
                        info!(collection, %id, "Updated");
                        let _ = respond_to.send(Ok(document.clone()));
                    } else {
                        warn!(collection, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(collection, size = self.documents.len(), "Shutdown");
    }
}
