//! # Order Service
//!
//! Order placement with per-client admission control, rule-based discounts and
//! daily reminders for unpaid orders, built on the [`doc_store`] collections.
//!
//! ## Components
//!
//! - **[rate_limiter]**: per-identity admission over a trailing window.
//! - **[discount_engine]**: applies one discount rule to an in-flight order.
//! - **[pipeline]**: validates, resolves, discounts and stores a new order.
//! - **[reminder]**: schedules a reminder per pending order for the next local midnight.
//!
//! Around them:
//!
//! - **[model]**: the stored documents ([`Customer`](model::Customer), [`Product`](model::Product),
//!   [`Order`](model::Order), [`DiscountRule`](model::DiscountRule)).
//! - **`*_actor`**: each document's [`Document`](doc_store::Document) implementation and error type.
//! - **[clients]**: typed wrappers over the collection clients.
//! - **[lifecycle]**: starts, wires and stops everything.
//! - **[http]**: `POST /place-order` behind the rate-limit middleware.
//! - **[config]**, **[clock]**: environment configuration and local-time arithmetic.
//!
//! ## Testing
//!
//! See [`doc_store::mock`] for scripting collection answers without running the
//! actors, and [`clock::ManualClock`] for pinning the current time.

pub mod clients;
pub mod clock;
pub mod config;
pub mod customer_actor;
pub mod discount_actor;
pub mod discount_engine;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod pipeline;
pub mod product_actor;
pub mod rate_limiter;
pub mod reminder;
