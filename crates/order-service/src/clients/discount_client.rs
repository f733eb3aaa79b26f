//! # Discount Client
//!
//! Wraps a `CollectionClient<DiscountRule>`; rules are resolved by code.
use crate::clients::map_store_error;
use crate::discount_actor::DiscountError;
use crate::model::{DiscountCreate, DiscountFilter, DiscountId, DiscountRule};
use async_trait::async_trait;
use doc_store::{CollectionClient, StoreClient, StoreError};
use tracing::{debug, instrument};

/// Client for the discount rule collection.
#[derive(Clone)]
pub struct DiscountClient {
    inner: CollectionClient<DiscountRule>,
}

impl DiscountClient {
    pub fn new(inner: CollectionClient<DiscountRule>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn insert_rule(&self, params: DiscountCreate) -> Result<DiscountId, DiscountError> {
        debug!("Sending request");
        self.inner.insert(params).await.map_err(Self::map_error)
    }

    /// The rule stored under `code`, if any. When a code was stored twice the
    /// earliest rule wins.
    #[instrument(skip(self))]
    pub async fn find_by_code(&self, code: &str) -> Result<Option<DiscountRule>, DiscountError> {
        debug!("Sending request");
        let rules = self
            .inner
            .find(DiscountFilter::Code(code.to_string()))
            .await
            .map_err(Self::map_error)?;
        Ok(rules.into_iter().next())
    }
}

#[async_trait]
impl StoreClient<DiscountRule> for DiscountClient {
    type Error = DiscountError;

    fn inner(&self) -> &CollectionClient<DiscountRule> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        map_store_error(e, DiscountError::NotFound, DiscountError::ActorCommunicationError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DiscountStrategy;
    use doc_store::mock::MockCollection;

    fn rule(id: u32, code: &str, rate: f64) -> DiscountRule {
        DiscountRule {
            id: DiscountId(id),
            code: code.to_string(),
            strategy: DiscountStrategy::PercentageAll { rate },
        }
    }

    #[tokio::test]
    async fn earliest_rule_wins_and_absent_code_is_none() {
        let mut mock = MockCollection::<DiscountRule>::new();
        mock.expect_find()
            .return_ok(vec![rule(1, "IC003", 0.1), rule(5, "IC003", 0.5)]);
        mock.expect_find().return_ok(Vec::new());

        let client = DiscountClient::new(mock.client());
        let found = client.find_by_code("IC003").await.unwrap().unwrap();
        assert_eq!(found.id, DiscountId(1));
        assert!(client.find_by_code("NOPE").await.unwrap().is_none());
        mock.verify();
    }

    #[tokio::test]
    async fn invalid_rate_survives_the_store_boundary() {
        let mut mock = MockCollection::<DiscountRule>::new();
        mock.expect_insert().return_err(StoreError::Document(Box::new(DiscountError::InvalidRate {
            code: "BAD".into(),
            rate: 2.0,
        })));

        let client = DiscountClient::new(mock.client());
        let err = client
            .insert_rule(DiscountCreate::new("BAD", DiscountStrategy::PercentageAll { rate: 2.0 }))
            .await
            .unwrap_err();
        assert!(matches!(err, DiscountError::InvalidRate { .. }));
    }
}
