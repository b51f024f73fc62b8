//! Transport configuration types.

use serde::{Deserialize, Serialize};

/// Transport configuration options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Standard input/output transport (default for MCP).
    #[default]
    Stdio,
}

impl TransportConfig {
    /// Create a STDIO transport config.
    pub fn stdio() -> Self {
        Self::Stdio
    }

    /// Load transport config from environment variables.
    ///
    /// `MCP_TRANSPORT` is accepted for forward compatibility but the
    /// only supported value is `stdio`.
    pub fn from_env() -> Self {
        if let Ok(transport) = std::env::var("MCP_TRANSPORT") {
            if !transport.is_empty() && transport.to_lowercase() != "stdio" {
                tracing::warn!(
                    "Unsupported transport '{}' requested, falling back to stdio",
                    transport
                );
            }
        }
        Self::Stdio
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self {
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
        }
    }
}
