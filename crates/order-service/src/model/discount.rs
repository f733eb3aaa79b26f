use serde::{Deserialize, Serialize};

crate::model::document_id!(
    /// Type-safe identifier for discount rules.
    DiscountId,
    "discount"
);

/// How a discount rule reduces an order's prices.
///
/// Stored rules are tagged by `kind`. A stored rule with a kind this build does
/// not recognise deserializes to [`DiscountStrategy::Unsupported`] and applies
/// no discount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiscountStrategy {
    /// Reduce every line item by `rate`.
    PercentageAll { rate: f64 },
    /// Reduce only line items tagged with `category`.
    PercentageByCategory { category: String, rate: f64 },
    /// Reduce every line item, but only for orders created on a Saturday or Sunday.
    WeekendOnly { rate: f64 },
    #[serde(other)]
    Unsupported,
}

impl DiscountStrategy {
    pub fn rate(&self) -> Option<f64> {
        match self {
            DiscountStrategy::PercentageAll { rate }
            | DiscountStrategy::PercentageByCategory { rate, .. }
            | DiscountStrategy::WeekendOnly { rate } => Some(*rate),
            DiscountStrategy::Unsupported => None,
        }
    }
}

/// A discount rule, looked up by its `code`.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountRule {
    pub id: DiscountId,
    pub code: String,
    pub strategy: DiscountStrategy,
}

/// Payload for storing a discount rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountCreate {
    pub code: String,
    #[serde(flatten)]
    pub strategy: DiscountStrategy,
}

impl DiscountCreate {
    pub fn new(code: impl Into<String>, strategy: DiscountStrategy) -> Self {
        Self {
            code: code.into(),
            strategy,
        }
    }
}

/// Queries answered by the discount collection.
#[derive(Debug, Clone, PartialEq)]
pub enum DiscountFilter {
    Code(String),
}

impl DiscountRule {
    /// The rules of the legacy catalog, seeded into the store at start-up.
    pub fn builtin_catalog() -> Vec<DiscountCreate> {
        vec![
            DiscountCreate::new("IC003", DiscountStrategy::PercentageAll { rate: 0.10 }),
            DiscountCreate::new(
                "IC042",
                DiscountStrategy::PercentageByCategory {
                    category: "electronic".to_string(),
                    rate: 0.05,
                },
            ),
            DiscountCreate::new("IC015", DiscountStrategy::WeekendOnly { rate: 0.10 }),
        ]
    }
}
