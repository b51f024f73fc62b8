//! Shared fixtures for tool dispatch tests.

use std::sync::Arc;

use crate::domains::auth::CredentialStore;
use crate::domains::auth::testing::{ScriptedExchanger, fresh_session};
use crate::domains::provider::testing::RecordingTransport;
use crate::domains::provider::{RateLimiter, SpotifyAdapter};

use super::service::SpotifyService;

/// A service over a recording fake transport with a fresh session, so
/// dispatch tests can assert exactly which provider calls were issued.
pub fn service_fixture() -> (Arc<SpotifyService>, Arc<RecordingTransport>) {
    let store = Arc::new(CredentialStore::in_memory(
        Box::new(ScriptedExchanger::succeeding("at-refreshed")),
        Some(fresh_session("at-1")),
    ));
    let transport = Arc::new(RecordingTransport::new());
    let adapter = SpotifyAdapter::new(
        transport.clone(),
        store,
        Arc::new(RateLimiter::new()),
        "https://api.spotify.test/v1",
        3,
    );
    (Arc::new(SpotifyService::new(adapter)), transport)
}
