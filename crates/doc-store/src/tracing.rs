//! # Observability & Tracing
//!
//! [`setup_tracing`] initialises structured logging for the whole service.
//!
//! The compact format hides the crate/module prefix (`with_target(false)`); collections
//! identify themselves through the `collection` field instead. Levels come from
//! `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run      # Compact logs
//! RUST_LOG=debug cargo run     # Full payloads and every lookup
//! RUST_LOG=doc_store=debug,order_service=info cargo run
//! ```
//!
//! With `RUST_LOG=info`, placing an order reads:
//!
//! ```text
//! INFO place_order: Placing order customer_id="customer_1" products=2
//! INFO Inserted collection="Order" id=order_1 size=1
//! INFO place_order: Order placed order_id=order_1 total=135.0
//! ```

/// Installs the global `tracing` subscriber. Call once, at process start.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
