//! The actor that owns the admission table.

use super::client::RateLimiter;
use super::RateLimitConfig;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};
use tokio::sync::{mpsc, oneshot};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

/// Message sent to the [`AdmissionActor`].
#[derive(Debug)]
pub enum AdmissionRequest {
    Admit {
        identity: String,
        respond_to: oneshot::Sender<bool>,
    },
    Count {
        identity: String,
        respond_to: oneshot::Sender<u32>,
    },
}

/// One charged unit, returned to `identity` at `due`.
#[derive(Debug)]
struct PendingRelease {
    identity: String,
    due: Instant,
}

/// Owns the per-identity counts and the queue of pending releases.
///
/// The window is fixed, so releases are queued in due order and only the front
/// of the queue is ever waited on. Due releases are applied both when the timer
/// fires and before every request is answered, so an answer never depends on
/// timer scheduling.
pub struct AdmissionActor {
    receiver: mpsc::Receiver<AdmissionRequest>,
    windows: HashMap<String, u32>,
    releases: VecDeque<PendingRelease>,
    config: RateLimitConfig,
}

impl AdmissionActor {
    pub fn new(config: RateLimitConfig, buffer_size: usize) -> (Self, RateLimiter) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            windows: HashMap::new(),
            releases: VecDeque::new(),
            config,
        };
        (actor, RateLimiter::new(sender))
    }

    /// Runs until every [`RateLimiter`] has been dropped.
    pub async fn run(mut self) {
        info!(
            limit = self.config.limit,
            window_secs = self.config.window.as_secs_f64(),
            "Rate limiter started"
        );

        loop {
            let next_due = self.releases.front().map(|release| release.due);
            tokio::select! {
                biased;
                _ = wait_for(next_due) => self.release_due(Instant::now()),
                msg = self.receiver.recv() => match msg {
                    Some(msg) => self.handle(msg),
                    None => break,
                },
            }
        }

        info!(
            identities = self.windows.len(),
            abandoned = self.releases.len(),
            "Rate limiter stopped"
        );
    }

    fn handle(&mut self, msg: AdmissionRequest) {
        self.release_due(Instant::now());
        match msg {
            AdmissionRequest::Admit {
                identity,
                respond_to,
            } => {
                let admitted = self.admit(identity, Instant::now());
                let _ = respond_to.send(admitted);
            }
            AdmissionRequest::Count {
                identity,
                respond_to,
            } => {
                let count = self.windows.get(&identity).copied().unwrap_or(0);
                let _ = respond_to.send(count);
            }
        }
    }

    fn admit(&mut self, identity: String, now: Instant) -> bool {
        let current = self.windows.get(&identity).copied().unwrap_or(0);
        if current >= self.config.limit {
            debug!(%identity, count = current, "Rejected");
            return false;
        }

        self.windows.insert(identity.clone(), current + 1);
        debug!(%identity, count = current + 1, "Admitted");
        self.releases.push_back(PendingRelease {
            identity,
            due: now + self.config.window,
        });
        true
    }

    /// Returns every unit whose window has elapsed by `now`. Identities that
    /// reach zero are dropped from the table.
    fn release_due(&mut self, now: Instant) {
        while self.releases.front().is_some_and(|release| release.due <= now) {
            let Some(release) = self.releases.pop_front() else {
                break;
            };
            if let Entry::Occupied(mut entry) = self.windows.entry(release.identity) {
                let count = entry.get_mut();
                *count = count.saturating_sub(1);
                if *count == 0 {
                    entry.remove();
                }
            }
        }
    }
}

async fn wait_for(due: Option<Instant>) {
    match due {
        Some(due) => sleep_until(due).await,
        None => std::future::pending().await,
    }
}
