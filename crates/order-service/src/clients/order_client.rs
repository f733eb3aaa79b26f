//! # Order Client
//!
//! Wraps a `CollectionClient<Order>`: persisting placed orders, enumerating
//! orders by status for the reminder sweep, and listing a customer's pending
//! products for the reminder email.
use crate::clients::map_store_error;
use crate::model::{CustomerId, LineItem, Order, OrderCreate, OrderFilter, OrderId, OrderStatus, OrderUpdate};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use doc_store::{CollectionClient, StoreClient, StoreError};
use tracing::{debug, info, instrument};

/// Client for the order collection.
#[derive(Clone)]
pub struct OrderClient {
    inner: CollectionClient<Order>,
}

impl OrderClient {
    pub fn new(inner: CollectionClient<Order>) -> Self {
        Self { inner }
    }

    /// Stores a built order and returns the id the collection assigned.
    #[instrument(skip(self, order), fields(customer_id = %order.customer_id, items = order.line_items.len()))]
    pub async fn insert_order(&self, order: Order) -> Result<OrderId, OrderError> {
        debug!("Sending request");
        let id = self
            .inner
            .insert(OrderCreate::from(order))
            .await
            .map_err(Self::map_error)?;
        info!(order_id = %id, "Order stored");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn find_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        self.inner
            .find(OrderFilter::Status(status))
            .await
            .map_err(Self::map_error)
    }

    /// Line items of every pending order the customer has, oldest order first.
    #[instrument(skip(self))]
    pub async fn find_products_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<LineItem>, OrderError> {
        debug!("Sending request");
        let orders = self
            .inner
            .find(OrderFilter::Customer {
                customer_id,
                status: OrderStatus::Pending,
            })
            .await
            .map_err(Self::map_error)?;
        Ok(orders.into_iter().flat_map(|order| order.line_items).collect())
    }

    #[instrument(skip(self))]
    pub async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .update(id, OrderUpdate::SetStatus(status))
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl StoreClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &CollectionClient<Order> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        map_store_error(e, OrderError::NotFound, OrderError::ActorCommunicationError)
    }
}
