//! Document trait implementation for the Customer domain type.

use super::CustomerError;
use crate::model::{Customer, CustomerCreate, CustomerId};
use doc_store::Document;

impl Document for Customer {
    type Id = CustomerId;
    type Create = CustomerCreate;
    type Update = ();
    type Filter = ();
    type Error = CustomerError;

    /// Registers a customer. Name and email must be non-blank and the email must
    /// contain an `@`.
    fn from_create(id: CustomerId, params: CustomerCreate) -> Result<Self, CustomerError> {
        let name = params.name.trim();
        let email = params.email.trim();
        if name.is_empty() {
            return Err(CustomerError::ValidationError("name must not be empty".into()));
        }
        if !email.contains('@') {
            return Err(CustomerError::ValidationError(format!(
                "invalid email address: {email:?}"
            )));
        }
        Ok(Self {
            id,
            name: name.to_string(),
            email: email.to_string(),
        })
    }

    fn apply_update(&mut self, _update: ()) -> Result<(), CustomerError> {
        Ok(())
    }

    fn matches(&self, _filter: &()) -> bool {
        true
    }
}
