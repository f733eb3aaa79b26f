//! # Collection Messages
//!
//! Request types exchanged between a [`CollectionClient`](crate::CollectionClient)
//! and its [`CollectionActor`](crate::CollectionActor).

use crate::document::Document;
use crate::error::StoreError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by collections.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Message sent to a collection actor.
///
/// The variants mirror the operations a document store offers: insert a document,
/// look one up by id, look several up by id, query by filter, and update in place.
/// Every variant is generic over `T: Document`, so a `Product` payload can never be
/// sent to the `Order` collection.
#[derive(Debug)]
pub enum StoreRequest<T: Document> {
    Insert {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    GetMany {
        ids: Vec<T::Id>,
        respond_to: Response<Vec<T>>,
    },
    Find {
        filter: T::Filter,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
}
