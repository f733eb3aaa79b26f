//! Document trait implementation for the Product domain type.
//!
//! Products are immutable once listed; a price change is a new catalog entry.

use super::ProductError;
use crate::model::{Product, ProductCreate, ProductId};
use doc_store::Document;

impl Document for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ();
    type Filter = ();
    type Error = ProductError;

    fn from_create(id: ProductId, params: ProductCreate) -> Result<Self, ProductError> {
        if !params.price.is_finite() || params.price < 0.0 {
            return Err(ProductError::InvalidPrice(params.price));
        }
        if params.name.trim().is_empty() {
            return Err(ProductError::ValidationError("name must not be empty".into()));
        }
        Ok(Self {
            id,
            name: params.name,
            price: params.price,
            categories: params.categories,
        })
    }

    fn apply_update(&mut self, _update: ()) -> Result<(), ProductError> {
        Ok(())
    }

    fn matches(&self, _filter: &()) -> bool {
        true
    }
}
