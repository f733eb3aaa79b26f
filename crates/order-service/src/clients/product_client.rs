//! # Product Client
//!
//! Wraps a `CollectionClient<Product>` and resolves the product lists of incoming
//! orders.
use crate::clients::map_store_error;
use crate::model::{Product, ProductCreate, ProductId};
use crate::product_actor::ProductError;
use async_trait::async_trait;
use doc_store::{CollectionClient, StoreClient, StoreError};
use tracing::{debug, instrument, warn};

/// Client for the product catalog.
#[derive(Clone)]
pub struct ProductClient {
    inner: CollectionClient<Product>,
}

impl ProductClient {
    pub fn new(inner: CollectionClient<Product>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn add_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.insert(params).await.map_err(Self::map_error)
    }

    /// Resolves every id, in request order, repeating products for repeated ids.
    ///
    /// Fails with [`ProductError::NotFound`] naming every id that does not exist.
    #[instrument(skip(self))]
    pub async fn find_products(&self, ids: Vec<ProductId>) -> Result<Vec<Product>, ProductError> {
        let products = self.find_many(ids.clone()).await?;
        if products.len() == ids.len() {
            return Ok(products);
        }

        let mut missing: Vec<String> = Vec::new();
        for id in ids.iter().filter(|id| !products.iter().any(|p| p.id == **id)) {
            let id = id.to_string();
            if !missing.contains(&id) {
                missing.push(id);
            }
        }
        warn!(missing = ?missing, "Products not found");
        Err(ProductError::NotFound(missing.join(", ")))
    }
}

#[async_trait]
impl StoreClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &CollectionClient<Product> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        map_store_error(e, ProductError::NotFound, ProductError::ActorCommunicationError)
    }
}
