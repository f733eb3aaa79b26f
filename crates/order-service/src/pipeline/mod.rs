//! # Order Pipeline
//!
//! Turns a [`PlaceOrderRequest`] into a stored, discounted, pending [`Order`].
//! Each step is a hard gate:
//!
//! 1. Validate the request shape (no lookups yet).
//! 2. Resolve the customer.
//! 3. Resolve every product. One missing product fails the whole order.
//! 4. Resolve the discount rule, when a non-blank code was given. An unknown code
//!    means no discount.
//! 5. Build the pending order, timestamped with the pipeline's clock.
//! 6. Apply the discount.
//! 7. Store it and acknowledge.

pub mod error;

pub use error::*;

use crate::clients::{CustomerClient, DiscountClient, OrderClient, ProductClient};
use crate::clock::{Clock, SystemClock};
use crate::discount_engine;
use crate::model::{CustomerId, LineItem, Order, OrderId, ProductId};
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use doc_store::StoreClient;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Acknowledgment text returned for every placed order.
pub const ORDER_PLACED: &str = "Order placed successfully";

/// An order as submitted by a client. Identifiers are raw strings and are
/// validated by the pipeline, not by deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceOrderRequest {
    #[serde(default)]
    pub customer_id: String,
    #[serde(default)]
    pub product_ids: Vec<String>,
    #[serde(default)]
    pub discount_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderAck {
    pub order_id: OrderId,
    pub message: String,
}

#[derive(Debug)]
struct ValidRequest {
    customer_id: CustomerId,
    product_ids: Vec<ProductId>,
    discount_code: Option<String>,
}

fn validate(request: &PlaceOrderRequest) -> Result<ValidRequest, PipelineError> {
    if request.customer_id.trim().is_empty() {
        return Err(PipelineError::Validation("customer_id is required".into()));
    }
    let customer_id = request
        .customer_id
        .parse::<CustomerId>()
        .map_err(|e| PipelineError::Validation(e.to_string()))?;

    if request.product_ids.is_empty() {
        return Err(PipelineError::Validation(
            "at least one product is required".into(),
        ));
    }
    let product_ids = request
        .product_ids
        .iter()
        .map(|raw| raw.parse::<ProductId>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| PipelineError::Validation(e.to_string()))?;

    let discount_code = request
        .discount_code
        .as_deref()
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string);

    Ok(ValidRequest {
        customer_id,
        product_ids,
        discount_code,
    })
}

/// Places orders against the store. Cheap to clone; every clone shares the same
/// collections and clock.
#[derive(Clone)]
pub struct OrderPipeline {
    customers: CustomerClient,
    products: ProductClient,
    discounts: DiscountClient,
    orders: OrderClient,
    clock: Arc<dyn Clock>,
}

impl OrderPipeline {
    pub fn new(
        customers: CustomerClient,
        products: ProductClient,
        discounts: DiscountClient,
        orders: OrderClient,
    ) -> Self {
        Self {
            customers,
            products,
            discounts,
            orders,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the clock used to timestamp new orders.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[instrument(
        skip(self, request),
        fields(customer_id = %request.customer_id, products = request.product_ids.len())
    )]
    pub async fn place_order(&self, request: PlaceOrderRequest) -> Result<OrderAck, PipelineError> {
        let request = validate(&request)?;
        info!("Placing order");

        let customer = self
            .customers
            .find_by_id(request.customer_id)
            .await
            .map_err(PipelineError::lookup)?
            .ok_or_else(|| PipelineError::NotFound(format!("customer {}", request.customer_id)))?;

        let products = self
            .products
            .find_products(request.product_ids)
            .await
            .map_err(|e| match e {
                ProductError::NotFound(ids) => PipelineError::NotFound(format!("products {ids}")),
                other => PipelineError::lookup(other),
            })?;

        let rule = match &request.discount_code {
            Some(code) => {
                let rule = self
                    .discounts
                    .find_by_code(code)
                    .await
                    .map_err(PipelineError::lookup)?;
                if rule.is_none() {
                    debug!(%code, "Unknown discount code");
                }
                rule
            }
            None => None,
        };

        let line_items = products.iter().map(LineItem::from).collect();
        let order = Order::pending(customer.id, self.clock.now(), line_items);
        let order = discount_engine::apply(order, rule.as_ref());
        let total = order.total();

        let order_id = self.orders.insert_order(order).await.map_err(|e| match e {
            OrderError::ValidationError(msg) => PipelineError::Validation(msg),
            other => PipelineError::lookup(other),
        })?;

        info!(%order_id, total, "Order placed");
        Ok(OrderAck {
            order_id,
            message: ORDER_PLACED.to_string(),
        })
    }
}
