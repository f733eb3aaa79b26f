//! The handle request handlers use to ask for admission.

use super::actor::AdmissionRequest;
use super::RateLimiterError;
use tokio::sync::{mpsc, oneshot};
use tracing::warn;

/// Cloneable handle to an [`AdmissionActor`](super::AdmissionActor).
#[derive(Clone)]
pub struct RateLimiter {
    sender: mpsc::Sender<AdmissionRequest>,
}

impl RateLimiter {
    pub fn new(sender: mpsc::Sender<AdmissionRequest>) -> Self {
        Self { sender }
    }

    /// Charges one request against `identity`. Returns `false` when the identity is
    /// at its limit, or when the limiter is no longer running.
    pub async fn admit(&self, identity: &str) -> bool {
        let (respond_to, response) = oneshot::channel();
        let request = AdmissionRequest::Admit {
            identity: identity.to_string(),
            respond_to,
        };
        if self.sender.send(request).await.is_err() {
            warn!(%identity, "Rate limiter closed, rejecting request");
            return false;
        }
        response.await.unwrap_or_else(|_| {
            warn!(%identity, "Rate limiter dropped request, rejecting");
            false
        })
    }

    /// Units currently charged against `identity`.
    pub async fn active_count(&self, identity: &str) -> Result<u32, RateLimiterError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(AdmissionRequest::Count {
                identity: identity.to_string(),
                respond_to,
            })
            .await
            .map_err(|_| RateLimiterError::Closed)?;
        response.await.map_err(|_| RateLimiterError::Dropped)
    }
}
