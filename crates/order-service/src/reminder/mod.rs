//! # Pending-Order Reminders
//!
//! Once a day the [`ReminderScheduler`] enumerates every `pending` order and
//! schedules one reminder per order for the next local midnight. Each reminder
//! is an independent timer task: at midnight it looks up the customer and the
//! customer's pending products, renders the email, and hands it to a
//! [`NotificationSink`].
//!
//! ## Structure
//!
//! - [`scheduler`] - [`ReminderScheduler`], [`SweepReport`] and the daily trigger loop
//! - [`sink`] - [`NotificationSink`], [`Notification`] and the bundled sinks
//!
//! ## Staleness
//!
//! Orders are not re-checked before firing: an order paid between the sweep and
//! midnight is still reminded about. Timers live in memory and do not survive a
//! restart.

pub mod scheduler;
pub mod sink;

pub use scheduler::*;
pub use sink::*;
