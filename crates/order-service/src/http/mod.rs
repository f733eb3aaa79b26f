//! # HTTP Surface
//!
//! A single route, `POST /place-order`, behind the rate-limit middleware.
//! Every request is charged against the caller's IP address before it reaches
//! the handler.

pub mod error;
pub mod middleware;
pub mod routes;

pub use error::{ApiError, ErrorResponse};

use crate::pipeline::OrderPipeline;
use crate::rate_limiter::RateLimiter;
use axum::middleware::from_fn_with_state;
use axum::routing::post;
use axum::Router;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: OrderPipeline,
    pub limiter: RateLimiter,
}

/// Builds the service router. Serve it with
/// `into_make_service_with_connect_info::<SocketAddr>()` so the middleware can
/// see the remote address.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/place-order", post(routes::place_order))
        .layer(from_fn_with_state(state.clone(), middleware::rate_limit))
        .with_state(state)
}
