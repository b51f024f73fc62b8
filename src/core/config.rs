//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, configuration files, or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by domain for clarity and maintainability. Loaded once at startup and
/// immutable for the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Spotify provider configuration.
    pub spotify: SpotifyConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Configuration for the Spotify provider integration.
#[derive(Clone, Serialize, Deserialize)]
pub struct SpotifyConfig {
    /// OAuth client id issued by the Spotify developer dashboard.
    pub client_id: String,

    /// OAuth client secret paired with the client id.
    pub client_secret: String,

    /// Redirect URI registered for the authorization-code flow.
    /// Only used by the out-of-band handshake; the server itself
    /// performs the refresh leg only.
    pub redirect_uri: Option<String>,

    /// Base URL of the Spotify Web API.
    pub api_base: String,

    /// URL of the OAuth token endpoint.
    pub token_url: String,

    /// Path of the persisted credential record.
    pub credentials_path: PathBuf,

    /// Per-call timeout for provider HTTP requests, in seconds.
    pub request_timeout_secs: u64,

    /// Maximum attempts per provider call (initial try plus throttle retries).
    pub max_attempts: u32,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for SpotifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpotifyConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .field("api_base", &self.api_base)
            .field("token_url", &self.token_url)
            .field("credentials_path", &self.credentials_path)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_attempts", &self.max_attempts)
            .finish()
    }
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: None,
            api_base: "https://api.spotify.com/v1".to_string(),
            token_url: "https://accounts.spotify.com/api/token".to_string(),
            credentials_path: PathBuf::from(".spotify_credentials.json"),
            request_timeout_secs: 10,
            max_attempts: 3,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "spotify-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            spotify: SpotifyConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server-level variables use the `MCP_` prefix, provider credentials
    /// the `SPOTIFY_` prefix. For example: `MCP_LOG_LEVEL`,
    /// `SPOTIFY_CLIENT_ID`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        if let Ok(client_id) = std::env::var("SPOTIFY_CLIENT_ID") {
            config.spotify.client_id = client_id;
        } else {
            warn!("SPOTIFY_CLIENT_ID not set; token refresh will fail until configured");
        }

        if let Ok(client_secret) = std::env::var("SPOTIFY_CLIENT_SECRET") {
            config.spotify.client_secret = client_secret;
        } else {
            warn!("SPOTIFY_CLIENT_SECRET not set; token refresh will fail until configured");
        }

        if let Ok(redirect_uri) = std::env::var("SPOTIFY_REDIRECT_URI") {
            config.spotify.redirect_uri = Some(normalize_redirect_uri(redirect_uri));
        }

        if let Ok(api_base) = std::env::var("SPOTIFY_API_BASE") {
            config.spotify.api_base = api_base.trim_end_matches('/').to_string();
        }

        if let Ok(token_url) = std::env::var("SPOTIFY_TOKEN_URL") {
            config.spotify.token_url = token_url;
        }

        if let Ok(path) = std::env::var("SPOTIFY_CREDENTIALS_PATH") {
            config.spotify.credentials_path = PathBuf::from(path);
            info!(
                "Credential store path set to {:?}",
                config.spotify.credentials_path
            );
        }

        if let Ok(timeout) = std::env::var("SPOTIFY_REQUEST_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse() {
                config.spotify.request_timeout_secs = secs;
            }
        }

        if let Ok(attempts) = std::env::var("SPOTIFY_MAX_ATTEMPTS") {
            if let Ok(n) = attempts.parse::<u32>() {
                config.spotify.max_attempts = n.max(1);
            }
        }

        config
    }
}

/// Normalize a redirect URI to the form Spotify accepts.
///
/// Spotify requires an explicit scheme and rejects a trailing slash
/// mismatch against the registered value, so we trim the latter.
fn normalize_redirect_uri(uri: String) -> String {
    let trimmed = uri.trim().trim_end_matches('/');
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_spotify_config_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("SPOTIFY_CLIENT_ID", "client-123");
            std::env::set_var("SPOTIFY_CLIENT_SECRET", "secret-456");
            std::env::set_var("SPOTIFY_MAX_ATTEMPTS", "5");
        }
        let config = Config::from_env();
        assert_eq!(config.spotify.client_id, "client-123");
        assert_eq!(config.spotify.client_secret, "secret-456");
        assert_eq!(config.spotify.max_attempts, 5);
        unsafe {
            std::env::remove_var("SPOTIFY_CLIENT_ID");
            std::env::remove_var("SPOTIFY_CLIENT_SECRET");
            std::env::remove_var("SPOTIFY_MAX_ATTEMPTS");
        }
    }

    #[test]
    fn test_spotify_defaults() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        let config = Config::default();
        assert_eq!(config.spotify.api_base, "https://api.spotify.com/v1");
        assert_eq!(config.spotify.request_timeout_secs, 10);
        assert_eq!(config.spotify.max_attempts, 3);
    }

    #[test]
    fn test_secret_redacted_in_debug() {
        let spotify = SpotifyConfig {
            client_secret: "super_secret_key".to_string(),
            ..SpotifyConfig::default()
        };
        let debug_str = format!("{:?}", spotify);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_key"));
    }

    #[test]
    fn test_normalize_redirect_uri() {
        assert_eq!(
            normalize_redirect_uri("http://localhost:8888/callback/".to_string()),
            "http://localhost:8888/callback"
        );
        assert_eq!(
            normalize_redirect_uri("localhost:8888/callback".to_string()),
            "http://localhost:8888/callback"
        );
    }

    #[test]
    fn test_max_attempts_floor() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("SPOTIFY_MAX_ATTEMPTS", "0");
        }
        let config = Config::from_env();
        assert_eq!(config.spotify.max_attempts, 1);
        unsafe {
            std::env::remove_var("SPOTIFY_MAX_ATTEMPTS");
        }
    }
}
