//! # Discount Engine
//!
//! Applies one [`DiscountRule`] to an in-flight [`Order`]. The engine is a pure
//! transform of line-item prices: it never looks anything up and never fails.
//!
//! | Strategy | Effect |
//! |----------|--------|
//! | `PercentageAll` | every line item reduced by `price * rate` |
//! | `PercentageByCategory` | only items tagged with the category |
//! | `WeekendOnly` | like `PercentageAll`, on Saturday or Sunday in the order's offset |
//! | `Unsupported` | nothing |
//!
//! A code already recorded on the order is not applied again, and prices never
//! drop below zero. Rates are validated when a rule is stored, not here.

use crate::model::{DiscountRule, DiscountStrategy, LineItem, Order};
use chrono::{Datelike, Weekday};
use tracing::debug;

/// Applies `rule` to `order`; `None` leaves the order unchanged.
pub fn apply(order: Order, rule: Option<&DiscountRule>) -> Order {
    match rule {
        Some(rule) => apply_rule(order, rule),
        None => order,
    }
}

/// Applies a single rule, dispatching on its strategy.
pub fn apply_rule(mut order: Order, rule: &DiscountRule) -> Order {
    if order.line_items.is_empty() {
        return order;
    }
    if order.applied_discount.as_deref() == Some(rule.code.as_str()) {
        debug!(code = %rule.code, "Discount already applied");
        return order;
    }

    let applied = match &rule.strategy {
        DiscountStrategy::PercentageAll { rate } => {
            reduce(&mut order.line_items, *rate, |_| true);
            true
        }
        DiscountStrategy::PercentageByCategory { category, rate } => {
            reduce(&mut order.line_items, *rate, |item| item.in_category(category));
            true
        }
        DiscountStrategy::WeekendOnly { rate } => {
            let weekend = is_weekend(&order);
            if weekend {
                reduce(&mut order.line_items, *rate, |_| true);
            }
            weekend
        }
        DiscountStrategy::Unsupported => false,
    };

    if applied {
        order.applied_discount = Some(rule.code.clone());
    }
    debug!(code = %rule.code, applied, total = order.total(), "Discount evaluated");
    order
}

fn reduce(items: &mut [LineItem], rate: f64, eligible: impl Fn(&LineItem) -> bool) {
    for item in items.iter_mut().filter(|item| eligible(item)) {
        item.price = (item.price - item.price * rate).max(0.0);
    }
}

fn is_weekend(order: &Order) -> bool {
    matches!(order.created_at.weekday(), Weekday::Sat | Weekday::Sun)
}
