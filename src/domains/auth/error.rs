//! Credential store error types.

use thiserror::Error;

/// Errors that can occur while managing the OAuth session.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The refresh token was rejected by the provider. This is terminal;
    /// the OAuth handshake must be re-run out of band.
    #[error("Not authenticated: the refresh token was rejected, re-run the OAuth handshake")]
    Unauthenticated,

    /// No credential record exists yet.
    #[error("No stored credentials: run the OAuth handshake first")]
    MissingCredentials,

    /// The token endpoint could not be reached or answered outside the
    /// expected protocol. Transient.
    #[error("Token endpoint error: {0}")]
    TokenEndpoint(String),

    /// The credential record could not be read or written.
    #[error("Credential persistence error: {0}")]
    Persist(#[from] std::io::Error),

    /// The credential record could not be parsed.
    #[error("Credential record malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl AuthError {
    /// Create a token endpoint error.
    pub fn token_endpoint(msg: impl Into<String>) -> Self {
        Self::TokenEndpoint(msg.into())
    }
}
