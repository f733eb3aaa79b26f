use super::{ApiError, AppState};
use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use std::net::SocketAddr;
use tracing::debug;

/// Identity charged for requests whose remote address is unknown.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Charges the request against its remote IP; rejects with 429 at the limit.
pub async fn rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = client_identity(&request);
    if !state.limiter.admit(&identity).await {
        debug!(%identity, "Rate limited");
        return Err(ApiError::RateLimited);
    }

    Ok(next.run(request).await)
}

fn client_identity(request: &Request) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_owned())
}
