//! # System Lifecycle
//!
//! [`OrderSystem`] creates every collection, the rate limiter and the reminder
//! scheduler, wires their clients into the pipeline, and tears it all down again.
//!
//! ```rust,ignore
//! let mut system = OrderSystem::new(&config, Arc::new(LogSink), Arc::new(SystemClock));
//! system.seed_discounts().await?;
//! system.start_daily_trigger(config.reminder_at);
//!
//! let app = http::router(system.app_state());
//! // ... serve ...
//!
//! system.shutdown().await?;
//! ```
//!
//! ## Shutdown
//!
//! Every actor stops once the last clone of its client is gone. Shutdown first
//! stops everything that holds clones on its own (the daily trigger and the armed
//! reminder timers), then drops the system's clients and awaits each actor task.
//! Pending rate-limit releases and unsent reminders are discarded.

mod order_system;

pub use order_system::OrderSystem;
