//! # Rate Limiter
//!
//! Per-client admission control over a trailing window.
//!
//! Every admitted request charges one unit against its client identity (the
//! remote address). Each unit is returned exactly one window after it was
//! charged, however the request ended. A client holding `limit` units is
//! rejected until its oldest unit decays. This is a decaying-count
//! approximation of a sliding window: with the defaults (100 per 60 s) the
//! 101st request inside a minute is turned away, and the first request a full
//! window after the first admission gets through again.
//!
//! ## Structure
//!
//! - [`actor`] - [`AdmissionActor`], which owns the count table and the release queue
//! - [`client`] - [`RateLimiter`], the cloneable handle request handlers call
//! - [`new()`] - Factory function that creates both
//!
//! ```rust,ignore
//! let (actor, limiter) = rate_limiter::new(RateLimitConfig::default(), 64);
//! tokio::spawn(actor.run());
//!
//! if !limiter.admit("10.0.0.7").await {
//!     // 429
//! }
//! ```
//!
//! The table lives in a single task, so check-and-increment for one identity is
//! serialized without locks. Once every [`RateLimiter`] clone is dropped the
//! actor stops and any pending releases are abandoned.

pub mod actor;
pub mod client;

pub use actor::AdmissionActor;
pub use client::RateLimiter;

use std::time::Duration;
use thiserror::Error;

/// Admission parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Units a single identity may hold at once.
    pub limit: u32,
    /// How long each admitted request stays charged.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            limit: 100,
            window: Duration::from_secs(60),
        }
    }
}

/// Errors from inspecting the limiter. Admission itself never fails: an
/// unreachable limiter rejects.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RateLimiterError {
    #[error("Rate limiter closed")]
    Closed,
    #[error("Rate limiter dropped response channel")]
    Dropped,
}

/// Creates a new admission actor and its client.
pub fn new(config: RateLimitConfig, buffer_size: usize) -> (AdmissionActor, RateLimiter) {
    AdmissionActor::new(config, buffer_size)
}
