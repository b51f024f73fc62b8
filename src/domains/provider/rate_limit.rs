//! Rate limiting and backoff for outbound provider calls.
//!
//! Spotify scopes quotas per endpoint category, so state is tracked per
//! `EndpointClass`. `acquire` suspends the calling task until quota opens
//! up; it never busy-spins. The counters live behind a plain mutex that is
//! only held for bookkeeping, all waiting happens outside the lock.

use rand::Rng as _;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

use super::http::ResponseMeta;

/// Exponential backoff base when the provider sends no `Retry-After`.
const BACKOFF_BASE: Duration = Duration::from_secs(1);
/// Upper bound on any computed backoff delay.
const BACKOFF_CAP: Duration = Duration::from_secs(30);
/// Jitter applied to the exponential default, as a fraction of the delay.
const JITTER_FRACTION: f64 = 0.2;

/// Provider endpoint categories with independent quotas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointClass {
    Search,
    Playback,
    Library,
}

impl EndpointClass {
    const COUNT: usize = 3;

    fn index(self) -> usize {
        match self {
            Self::Search => 0,
            Self::Playback => 1,
            Self::Library => 2,
        }
    }
}

/// Quota snapshot for one endpoint class.
#[derive(Debug, Clone, Default)]
struct RateState {
    /// Remaining request quota, when the provider advertises one.
    remaining: Option<u32>,

    /// When the quota window reopens.
    reset_at: Option<Instant>,
}

/// Throttles outgoing provider calls and computes retry backoff.
pub struct RateLimiter {
    states: Mutex<[RateState; EndpointClass::COUNT]>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            states: Mutex::new(Default::default()),
        }
    }

    /// Wait until the endpoint class has quota available.
    ///
    /// Suspends (tokio sleep) while the quota window is closed. Lock is
    /// released before any await point.
    pub async fn acquire(&self, class: EndpointClass) {
        loop {
            let wait = {
                let mut states = self.states.lock().unwrap_or_else(|e| e.into_inner());
                let state = &mut states[class.index()];
                match (state.remaining, state.reset_at) {
                    (Some(0), Some(reset_at)) => {
                        let now = Instant::now();
                        if reset_at > now {
                            reset_at - now
                        } else {
                            // Window reopened while we were away.
                            state.remaining = None;
                            state.reset_at = None;
                            return;
                        }
                    }
                    _ => return,
                }
            };

            debug!(?class, "Quota exhausted, suspending for {:?}", wait);
            tokio::time::sleep(wait).await;
        }
    }

    /// Update quota state from a provider response.
    pub fn record(&self, class: EndpointClass, status: u16, meta: &ResponseMeta) {
        let mut states = self.states.lock().unwrap_or_else(|e| e.into_inner());
        let state = &mut states[class.index()];

        if let Some(remaining) = meta.remaining {
            state.remaining = Some(remaining);
        }

        if status == 429 {
            let hold = meta.retry_after.unwrap_or(1);
            state.remaining = Some(0);
            state.reset_at = Some(Instant::now() + Duration::from_secs(hold));
            warn!(?class, "Provider throttled us, window closed for {}s", hold);
        }
    }

    /// Delay before the next retry attempt.
    ///
    /// A `Retry-After` signal is honored exactly. Otherwise exponential
    /// from 1s, capped at 30s, jittered by ±20% to avoid retry alignment
    /// across concurrent calls.
    pub fn backoff_delay(&self, attempt: u32, retry_after: Option<u64>) -> Duration {
        if let Some(secs) = retry_after {
            return Duration::from_secs(secs).min(BACKOFF_CAP);
        }

        let exp = BACKOFF_BASE
            .saturating_mul(1u32 << attempt.min(5))
            .min(BACKOFF_CAP);
        let jitter = rand::rng().random_range(-JITTER_FRACTION..=JITTER_FRACTION);
        exp.mul_f64(1.0 + jitter).min(BACKOFF_CAP)
    }
}
