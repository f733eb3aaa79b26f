use std::collections::BTreeSet;

crate::model::document_id!(
    /// Type-safe identifier for Products.
    ProductId,
    "product"
);

/// Represents a product in the catalog.
///
/// See [`impl Document for Product`](#impl-Document-for-Product) for details on:
/// - Creation parameters ([`ProductCreate`])
/// - Validation (non-negative, finite prices)
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub categories: BTreeSet<String>,
}

/// Payload for adding a product to the catalog.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub name: String,
    pub price: f64,
    pub categories: BTreeSet<String>,
}

impl ProductCreate {
    /// # Arguments
    /// * `name` - Product name
    /// * `price` - Unit price
    /// * `categories` - Category tags used by category discounts
    pub fn new<I, S>(name: impl Into<String>, price: f64, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            price,
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }
}
