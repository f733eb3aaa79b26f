//! Customer orders and their line items.
//!
//! An order carries a price snapshot of every product it was built from (its
//! [`LineItem`]s), so later catalog changes never alter an existing order. The
//! creation timestamp keeps the UTC offset it was recorded with; weekday-based
//! discounts are evaluated in that offset.
//!
//! See [`crate::order_actor`] for:
//! - Creation parameters ([`OrderCreate`])
//! - Status transitions ([`OrderUpdate`])
//! - Queries ([`OrderFilter`])

use crate::model::{CustomerId, Product, ProductId};
use chrono::{DateTime, FixedOffset};
use std::collections::BTreeSet;
use std::fmt::Display;

crate::model::document_id!(
    /// Type-safe identifier for Orders.
    OrderId,
    "order"
);

/// Lifecycle status of an order. Only `Pending` is non-terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Paid,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, OrderStatus::Pending)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

/// One product entry within an order, carrying its own price snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: f64,
    pub categories: BTreeSet<String>,
}

impl LineItem {
    pub fn in_category(&self, category: &str) -> bool {
        self.categories.contains(category)
    }
}

impl From<&Product> for LineItem {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            categories: product.categories.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub created_at: DateTime<FixedOffset>,
    pub status: OrderStatus,
    pub line_items: Vec<LineItem>,
    /// Code of the discount already applied, if any. A code is applied at most once.
    pub applied_discount: Option<String>,
}

impl Order {
    /// Creates a new pending Order that has not been stored yet.
    ///
    /// # Notes
    /// The `id` is a placeholder (`order_0`); the order collection assigns the real
    /// one on insert.
    pub fn pending(
        customer_id: CustomerId,
        created_at: DateTime<FixedOffset>,
        line_items: Vec<LineItem>,
    ) -> Self {
        Self {
            id: OrderId(0),
            customer_id,
            created_at,
            status: OrderStatus::Pending,
            line_items,
            applied_discount: None,
        }
    }

    /// Sum of the current line-item prices. Derived on demand, never stored.
    pub fn total(&self) -> f64 {
        self.line_items.iter().map(|item| item.price).sum()
    }

    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }
}

/// Payload for storing a new order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub customer_id: CustomerId,
    pub created_at: DateTime<FixedOffset>,
    pub status: OrderStatus,
    pub line_items: Vec<LineItem>,
    pub applied_discount: Option<String>,
}

impl From<Order> for OrderCreate {
    fn from(order: Order) -> Self {
        Self {
            customer_id: order.customer_id,
            created_at: order.created_at,
            status: order.status,
            line_items: order.line_items,
            applied_discount: order.applied_discount,
        }
    }
}

/// Updates accepted by the order collection.
#[derive(Debug, Clone, Copy)]
pub enum OrderUpdate {
    /// Move the order to another status. Terminal statuses are final.
    SetStatus(OrderStatus),
}

/// Queries answered by the order collection.
#[derive(Debug, Clone, Copy)]
pub enum OrderFilter {
    Status(OrderStatus),
    Customer {
        customer_id: CustomerId,
        status: OrderStatus,
    },
}
