//! Document trait implementation for the Order domain type.
//!
//! See the trait implementation on [`Order`] for method documentation.

use super::OrderError;
use crate::model::{Order, OrderCreate, OrderFilter, OrderId, OrderStatus, OrderUpdate};
use doc_store::Document;

impl Document for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Filter = OrderFilter;
    type Error = OrderError;

    /// Stores a built order under its assigned id.
    ///
    /// # Validation
    /// - At least one line item
    /// - Every line-item price finite and non-negative
    fn from_create(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        if params.line_items.is_empty() {
            return Err(OrderError::ValidationError(
                "order must contain at least one line item".into(),
            ));
        }
        if let Some(item) = params
            .line_items
            .iter()
            .find(|item| !item.price.is_finite() || item.price < 0.0)
        {
            return Err(OrderError::ValidationError(format!(
                "line item {} has invalid price {}",
                item.product_id, item.price
            )));
        }
        Ok(Self {
            id,
            customer_id: params.customer_id,
            created_at: params.created_at,
            status: params.status,
            line_items: params.line_items,
            applied_discount: params.applied_discount,
        })
    }

    fn apply_update(&mut self, update: OrderUpdate) -> Result<(), OrderError> {
        match update {
            OrderUpdate::SetStatus(to) if to == self.status => Ok(()),
            OrderUpdate::SetStatus(to) if self.status.is_terminal() || to == OrderStatus::Pending => {
                Err(OrderError::InvalidTransition {
                    from: self.status,
                    to,
                })
            }
            OrderUpdate::SetStatus(to) => {
                self.status = to;
                Ok(())
            }
        }
    }

    fn matches(&self, filter: &OrderFilter) -> bool {
        match filter {
            OrderFilter::Status(status) => self.status == *status,
            OrderFilter::Customer {
                customer_id,
                status,
            } => self.customer_id == *customer_id && self.status == *status,
        }
    }
}
