//! Outbound notification delivery.

use crate::model::{CustomerId, LineItem, OrderId};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use tracing::info;

/// A rendered reminder, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    /// Blank when the customer could not be looked up.
    pub recipient: String,
    pub body: String,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SinkError {
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Where reminders go.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn emit(&self, notification: Notification) -> Result<(), SinkError>;
}

/// Writes every reminder to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    async fn emit(&self, notification: Notification) -> Result<(), SinkError> {
        info!(
            order_id = %notification.order_id,
            customer_id = %notification.customer_id,
            recipient = %notification.recipient,
            body = %notification.body,
            "Sending order reminder"
        );
        Ok(())
    }
}

/// Keeps every reminder in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reminders emitted so far, in emission order.
    pub fn notifications(&self) -> Vec<Notification> {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl NotificationSink for MemorySink {
    async fn emit(&self, notification: Notification) -> Result<(), SinkError> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
        Ok(())
    }
}

/// Renders the reminder email body.
pub fn render_reminder(customer_name: &str, items: &[LineItem], checkout_url: &str) -> String {
    let details: String = items
        .iter()
        .map(|item| format!("- {}: ${:.2}\n", item.name, item.price))
        .collect();
    format!(
        "Dear {customer_name},\n\n\
         You have a pending order with the following products:\n{details}\n\n\
         Please complete the checkout process by visiting the link: {checkout_url}\n\n\
         Best regards,\nYour E-commerce Team"
    )
}
