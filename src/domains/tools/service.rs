//! Shared state handed to every tool handler.

use std::collections::HashSet;
use std::sync::Mutex;

use crate::domains::provider::SpotifyAdapter;

/// The adapter plus the request-scoped idempotency memo, shared by all
/// tool routes.
pub struct SpotifyService {
    adapter: SpotifyAdapter,
    /// Idempotency keys already honored by side-effecting calls.
    /// Process-local and never persisted; callers wanting dedup must
    /// supply a key, nothing is deduplicated implicitly.
    seen_keys: Mutex<HashSet<String>>,
}

impl SpotifyService {
    pub fn new(adapter: SpotifyAdapter) -> Self {
        Self {
            adapter,
            seen_keys: Mutex::new(HashSet::new()),
        }
    }

    pub fn adapter(&self) -> &SpotifyAdapter {
        &self.adapter
    }

    /// Record an idempotency key; returns true when it was already seen,
    /// in which case the caller short-circuits to an ok no-op.
    pub fn check_and_record_key(&self, key: &str) -> bool {
        let mut seen = self.seen_keys.lock().unwrap_or_else(|e| e.into_inner());
        !seen.insert(key.to_string())
    }
}
