//! Adapter error taxonomy.
//!
//! Closed set of error classes surfaced by the provider adapter. Tool
//! handlers and the response normalizer match on these variants and never
//! see raw provider status codes or bodies.

use thiserror::Error;

use crate::domains::auth::AuthError;

/// Errors surfaced by provider operations after local recovery
/// (refresh-on-401, bounded throttle retries) is exhausted.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// No valid session and refresh failed or is impossible.
    #[error("Not authenticated with the provider: {0}")]
    Unauthenticated(String),

    /// The session lacks the scope or the account lacks the entitlement.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The requested entity does not exist (unknown id, device, playlist).
    #[error("Not found: {0}")]
    NotFound(String),

    /// The provider rejected the request shape (400-class, not auth).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Still throttled after the retry budget.
    #[error("Rate limited by the provider")]
    RateLimited,

    /// Timeout, connection failure, or persistent 5xx.
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Unexpected adapter failure (malformed response body, internal bug).
    #[error("Internal adapter error: {0}")]
    Internal(String),
}

impl AdapterError {
    /// Whether the standard retry policy applies to this error when it
    /// occurs at the transport level (before a status code is available).
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ProviderUnavailable(_) | Self::RateLimited)
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::ProviderUnavailable(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<AuthError> for AdapterError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthenticated | AuthError::MissingCredentials => {
                Self::Unauthenticated(err.to_string())
            }
            AuthError::TokenEndpoint(msg) => Self::ProviderUnavailable(msg),
            AuthError::Persist(_) | AuthError::Malformed(_) => Self::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_mapping() {
        assert!(matches!(
            AdapterError::from(AuthError::Unauthenticated),
            AdapterError::Unauthenticated(_)
        ));
        assert!(matches!(
            AdapterError::from(AuthError::MissingCredentials),
            AdapterError::Unauthenticated(_)
        ));
        assert!(matches!(
            AdapterError::from(AuthError::token_endpoint("connect refused")),
            AdapterError::ProviderUnavailable(_)
        ));
    }

    #[test]
    fn test_retryable_classes() {
        assert!(AdapterError::unavailable("timeout").is_retryable());
        assert!(AdapterError::RateLimited.is_retryable());
        assert!(!AdapterError::NotFound("x".into()).is_retryable());
        assert!(!AdapterError::Unauthenticated("x".into()).is_retryable());
    }
}
