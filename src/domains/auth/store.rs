//! The credential store.
//!
//! Owns the single active `Session` and everything that mutates it:
//! transparent refresh ahead of expiry, the forced refresh after a
//! provider 401, and atomic persistence so credentials survive restarts.
//!
//! All access is serialized on an async mutex, which makes refresh
//! single-flight: two concurrent callers observing an expiring token
//! trigger at most one token exchange, and the second waiter reuses the
//! session the first one produced.

use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::error::AuthError;
use super::session::Session;
use super::token::TokenExchanger;

/// Holds and refreshes the OAuth session for this process.
pub struct CredentialStore {
    exchanger: Box<dyn TokenExchanger>,
    path: Option<PathBuf>,
    session: Mutex<Option<Session>>,
}

impl CredentialStore {
    /// Create a store with an already-known session and no persistence.
    /// Mostly useful in tests.
    pub fn in_memory(exchanger: Box<dyn TokenExchanger>, session: Option<Session>) -> Self {
        Self {
            exchanger,
            path: None,
            session: Mutex::new(session),
        }
    }

    /// Create a store backed by a credential file, loading the record if
    /// one exists.
    pub fn load(exchanger: Box<dyn TokenExchanger>, path: PathBuf) -> Result<Self, AuthError> {
        let session = match std::fs::read_to_string(&path) {
            Ok(contents) => {
                let session: Session = serde_json::from_str(&contents)?;
                info!("Loaded stored credentials from {:?}", path);
                Some(session)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    "No credential record at {:?}; tool calls will fail until the OAuth handshake has run",
                    path
                );
                None
            }
            Err(e) => return Err(AuthError::Persist(e)),
        };

        Ok(Self {
            exchanger,
            path: Some(path),
            session: Mutex::new(session),
        })
    }

    /// Return a session whose access token is valid for at least the
    /// safety margin, refreshing it first if necessary.
    pub async fn get_valid_session(&self) -> Result<Session, AuthError> {
        let mut guard = self.session.lock().await;
        let current = guard.as_ref().ok_or(AuthError::MissingCredentials)?;

        if current.is_fresh() {
            return Ok(current.clone());
        }

        debug!("Access token inside refresh margin, refreshing");
        self.refresh_locked(&mut guard).await
    }

    /// Force a refresh after the provider rejected a bearer token.
    ///
    /// `observed_access_token` is the token the caller sent; if it no
    /// longer matches the stored one, another task already refreshed and
    /// the current session is returned as-is.
    pub async fn force_refresh(&self, observed_access_token: &str) -> Result<Session, AuthError> {
        let mut guard = self.session.lock().await;
        let current = guard.as_ref().ok_or(AuthError::MissingCredentials)?;

        if current.access_token != observed_access_token {
            debug!("Session already rotated by a concurrent caller, reusing it");
            return Ok(current.clone());
        }

        self.refresh_locked(&mut guard).await
    }

    /// Drop the active session and its persisted record.
    /// Used on explicit logout and after terminal auth failures.
    pub async fn clear(&self) -> Result<(), AuthError> {
        let mut guard = self.session.lock().await;
        *guard = None;
        if let Some(path) = &self.path {
            match std::fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(AuthError::Persist(e)),
            }
        }
        info!("Credentials cleared");
        Ok(())
    }

    /// Exchange the refresh token and rotate the stored session.
    /// Caller must hold the session lock.
    async fn refresh_locked(
        &self,
        guard: &mut tokio::sync::MutexGuard<'_, Option<Session>>,
    ) -> Result<Session, AuthError> {
        let current = guard.as_ref().ok_or(AuthError::MissingCredentials)?;

        let grant = self
            .exchanger
            .exchange_refresh_token(&current.refresh_token)
            .await?;

        let refreshed = Session {
            access_token: grant.access_token,
            refresh_token: grant
                .refresh_token
                .unwrap_or_else(|| current.refresh_token.clone()),
            expires_at: Session::expiry_from_now(grant.expires_in_secs),
            scopes: if grant.scopes.is_empty() {
                current.scopes.clone()
            } else {
                grant.scopes
            },
        };

        self.persist(&refreshed)?;
        info!("Session refreshed, valid until {}", refreshed.expires_at);

        **guard = Some(refreshed.clone());
        Ok(refreshed)
    }

    /// Write the credential record atomically: serialize to a sibling
    /// temp file, restrict permissions, then rename over the target.
    fn persist(&self, session: &Session) -> Result<(), AuthError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let tmp = path.with_extension("tmp");
        let contents = serde_json::to_string_pretty(session)?;
        std::fs::write(&tmp, contents)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&tmp, std::fs::Permissions::from_mode(0o600))?;
        }

        std::fs::rename(&tmp, path)?;
        debug!("Credential record persisted to {:?}", path);
        Ok(())
    }
}
