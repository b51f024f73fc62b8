//! Token endpoint client.
//!
//! The credential store never talks HTTP itself; it goes through the
//! `TokenExchanger` trait so tests can script refresh outcomes.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use tracing::{debug, error};

use super::error::AuthError;

/// Outcome of a successful refresh-token exchange.
#[derive(Debug, Clone)]
pub struct TokenGrant {
    /// The new bearer token.
    pub access_token: String,

    /// Lifetime of the bearer, in seconds.
    pub expires_in_secs: i64,

    /// Replacement refresh token, if the provider rotated it.
    pub refresh_token: Option<String>,

    /// Scopes attached to the grant.
    pub scopes: Vec<String>,
}

/// Exchanges a refresh token for a new access token.
#[async_trait]
pub trait TokenExchanger: Send + Sync {
    async fn exchange_refresh_token(&self, refresh_token: &str) -> Result<TokenGrant, AuthError>;
}

/// Shape of the provider's token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

/// Production exchanger hitting the Spotify accounts service.
///
/// Authorization-code flow with a confidential client: the client id and
/// secret go in a Basic authorization header, the grant in a form body.
pub struct SpotifyTokenExchanger {
    client: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl SpotifyTokenExchanger {
    pub fn new(
        client: reqwest::Client,
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            client,
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    fn basic_auth_value(&self) -> String {
        let raw = format!("{}:{}", self.client_id, self.client_secret);
        format!("Basic {}", BASE64.encode(raw))
    }
}

#[async_trait]
impl TokenExchanger for SpotifyTokenExchanger {
    async fn exchange_refresh_token(&self, refresh_token: &str) -> Result<TokenGrant, AuthError> {
        debug!("Exchanging refresh token at {}", self.token_url);

        let body = serde_urlencoded::to_string([
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .map_err(|e| AuthError::token_endpoint(e.to_string()))?;

        let response = self
            .client
            .post(&self.token_url)
            .header(reqwest::header::AUTHORIZATION, self.basic_auth_value())
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(body)
            .send()
            .await
            .map_err(|e| AuthError::token_endpoint(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::BAD_REQUEST
            || status == reqwest::StatusCode::UNAUTHORIZED
        {
            // invalid_grant / invalid_client: the refresh token is gone.
            error!("Token endpoint rejected the refresh token ({})", status);
            return Err(AuthError::Unauthenticated);
        }
        if !status.is_success() {
            return Err(AuthError::token_endpoint(format!(
                "token endpoint returned {}",
                status
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::token_endpoint(e.to_string()))?;

        Ok(TokenGrant {
            access_token: token.access_token,
            expires_in_secs: token.expires_in,
            refresh_token: token.refresh_token,
            scopes: token
                .scope
                .map(|s| s.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
        })
    }
}
