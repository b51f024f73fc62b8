//! Scripted doubles for credential-store tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{Duration, Utc};

use super::error::AuthError;
use super::session::Session;
use super::token::{TokenExchanger, TokenGrant};

/// Shared exchange-call counter.
#[derive(Clone, Default)]
pub struct ExchangeCounter(Arc<AtomicUsize>);

impl ExchangeCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// A token exchanger that either always succeeds with a fixed access token
/// or always rejects the refresh token, counting every call.
pub struct ScriptedExchanger {
    access_token: Option<String>,
    counter: ExchangeCounter,
    delay_ms: u64,
}

impl ScriptedExchanger {
    pub fn succeeding(access_token: &str) -> Self {
        Self {
            access_token: Some(access_token.to_string()),
            counter: ExchangeCounter::default(),
            delay_ms: 0,
        }
    }

    pub fn rejecting() -> Self {
        Self {
            access_token: None,
            counter: ExchangeCounter::default(),
            delay_ms: 0,
        }
    }

    /// Widen the race window in concurrency tests.
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn counter(&self) -> ExchangeCounter {
        self.counter.clone()
    }
}

#[async_trait]
impl TokenExchanger for ScriptedExchanger {
    async fn exchange_refresh_token(&self, _refresh_token: &str) -> Result<TokenGrant, AuthError> {
        self.counter.0.fetch_add(1, Ordering::SeqCst);
        if self.delay_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.delay_ms)).await;
        }
        match &self.access_token {
            Some(token) => Ok(TokenGrant {
                access_token: token.clone(),
                expires_in_secs: 3600,
                refresh_token: None,
                scopes: Vec::new(),
            }),
            None => Err(AuthError::Unauthenticated),
        }
    }
}

/// A session whose token is valid well past the refresh margin.
pub fn fresh_session(access_token: &str) -> Session {
    Session {
        access_token: access_token.to_string(),
        refresh_token: "refresh-1".to_string(),
        expires_at: Utc::now() + Duration::hours(1),
        scopes: vec!["user-modify-playback-state".to_string()],
    }
}

/// A session already inside the refresh margin.
pub fn stale_session(access_token: &str) -> Session {
    Session {
        access_token: access_token.to_string(),
        refresh_token: "refresh-1".to_string(),
        expires_at: Utc::now() + Duration::seconds(10),
        scopes: vec!["user-modify-playback-state".to_string()],
    }
}
