//! Document trait implementation for [`DiscountRule`].

use super::DiscountError;
use crate::model::{DiscountCreate, DiscountFilter, DiscountId, DiscountRule};
use doc_store::Document;

impl Document for DiscountRule {
    type Id = DiscountId;
    type Create = DiscountCreate;
    type Update = ();
    type Filter = DiscountFilter;
    type Error = DiscountError;

    /// Stores a rule. The code is trimmed; the rate, when the strategy has one,
    /// must be finite and within `[0, 1]`.
    fn from_create(id: DiscountId, params: DiscountCreate) -> Result<Self, DiscountError> {
        let code = params.code.trim();
        if code.is_empty() {
            return Err(DiscountError::EmptyCode);
        }
        if let Some(rate) = params.strategy.rate() {
            if !(0.0..=1.0).contains(&rate) {
                return Err(DiscountError::InvalidRate {
                    code: code.to_string(),
                    rate,
                });
            }
        }
        Ok(Self {
            id,
            code: code.to_string(),
            strategy: params.strategy,
        })
    }

    fn apply_update(&mut self, _update: ()) -> Result<(), DiscountError> {
        Ok(())
    }

    fn matches(&self, filter: &DiscountFilter) -> bool {
        match filter {
            DiscountFilter::Code(code) => self.code == *code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DiscountStrategy;

    #[test]
    fn rates_outside_unit_interval_are_rejected() {
        for rate in [-0.1, 1.5, f64::NAN, f64::INFINITY] {
            let params = DiscountCreate::new("BAD", DiscountStrategy::PercentageAll { rate });
            assert!(matches!(
                DiscountRule::from_create(DiscountId(1), params),
                Err(DiscountError::InvalidRate { .. })
            ));
        }
    }

    #[test]
    fn boundary_rates_and_unsupported_rules_are_accepted() {
        let full = DiscountCreate::new("FREE", DiscountStrategy::WeekendOnly { rate: 1.0 });
        assert!(DiscountRule::from_create(DiscountId(1), full).is_ok());

        let unknown = DiscountCreate::new(" BOGO ", DiscountStrategy::Unsupported);
        let rule = DiscountRule::from_create(DiscountId(2), unknown).unwrap();
        assert_eq!(rule.code, "BOGO");
        assert!(rule.matches(&DiscountFilter::Code("BOGO".into())));
    }

    #[test]
    fn blank_codes_are_rejected() {
        let params = DiscountCreate::new("  ", DiscountStrategy::PercentageAll { rate: 0.1 });
        assert_eq!(
            DiscountRule::from_create(DiscountId(1), params).unwrap_err(),
            DiscountError::EmptyCode
        );
    }
}
