/// A registered customer.
///
/// Only the fields the order pipeline and the reminder emails need are kept:
/// the pipeline checks that the customer exists, and reminders address the
/// customer by name and email.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
}

crate::model::document_id!(
    /// Type-safe identifier for Customers.
    CustomerId,
    "customer"
);

/// Payload for registering a new customer.
#[derive(Debug, Clone)]
pub struct CustomerCreate {
    pub name: String,
    pub email: String,
}

impl CustomerCreate {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}
