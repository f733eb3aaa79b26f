//! # Customer Client
//!
//! Wraps a `CollectionClient<Customer>`. Lookups by id come from
//! [`StoreClient::find_by_id`].
use crate::clients::map_store_error;
use crate::customer_actor::CustomerError;
use crate::model::{Customer, CustomerCreate, CustomerId};
use async_trait::async_trait;
use doc_store::{CollectionClient, StoreClient, StoreError};
use tracing::{debug, instrument};

/// Client for the customer collection.
#[derive(Clone)]
pub struct CustomerClient {
    inner: CollectionClient<Customer>,
}

impl CustomerClient {
    pub fn new(inner: CollectionClient<Customer>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn register(&self, params: CustomerCreate) -> Result<CustomerId, CustomerError> {
        debug!("Sending request");
        self.inner.insert(params).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl StoreClient<Customer> for CustomerClient {
    type Error = CustomerError;

    fn inner(&self) -> &CollectionClient<Customer> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        map_store_error(e, CustomerError::NotFound, CustomerError::ActorCommunicationError)
    }
}
