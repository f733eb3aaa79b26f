//! # StoreClient Trait
//!
//! Common interface for collection-specific clients: provides `find_by_id` and
//! `find_many` on top of a generic `CollectionClient`, with errors mapped into the
//! domain client's own error type.
use crate::{CollectionClient, Document, StoreError};
use async_trait::async_trait;

/// Trait for collection-specific clients to inherit the standard lookups.
///
/// # Example
///
/// ```rust,ignore
/// #[async_trait]
/// impl StoreClient<Customer> for CustomerClient {
///     type Error = CustomerError;
///
///     fn inner(&self) -> &CollectionClient<Customer> {
///         &self.inner
///     }
///
///     fn map_error(e: StoreError) -> Self::Error {
///         CustomerError::ActorCommunicationError(e.to_string())
///     }
/// }
///
/// // find_by_id() and find_many() are provided automatically.
/// let customer = client.find_by_id(CustomerId(1)).await?;
/// ```
#[async_trait]
pub trait StoreClient<T: Document>: Send + Sync {
    /// The collection-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic CollectionClient.
    fn inner(&self) -> &CollectionClient<T>;

    /// Map store errors to the collection-specific error type.
    fn map_error(e: StoreError) -> Self::Error;

    /// Fetch a document by ID.
    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every document whose id appears in `ids`, in request order.
    #[tracing::instrument(skip(self))]
    async fn find_many(&self, ids: Vec<T::Id>) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get_many(ids).await.map_err(Self::map_error)
    }
}
