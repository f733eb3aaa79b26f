//! Typed clients over the [`CollectionClient`](doc_store::CollectionClient)s, one per
//! collection, each mapping store failures onto its collection's error enum.

pub mod customer_client;
pub mod discount_client;
pub mod order_client;
pub mod product_client;

pub use customer_client::*;
pub use discount_client::*;
pub use order_client::*;
pub use product_client::*;

use doc_store::StoreError;

/// Maps a store failure onto a collection error.
///
/// A rejected document travels boxed inside [`StoreError::Document`]; it is unboxed
/// back into `E` when it is one. Everything else becomes `communication`.
pub(crate) fn map_store_error<E>(
    e: StoreError,
    not_found: fn(String) -> E,
    communication: fn(String) -> E,
) -> E
where
    E: std::error::Error + 'static,
{
    match e {
        StoreError::NotFound(id) => not_found(id),
        StoreError::Document(inner) => match inner.downcast::<E>() {
            Ok(domain) => *domain,
            Err(other) => communication(other.to_string()),
        },
        other => communication(other.to_string()),
    }
}
