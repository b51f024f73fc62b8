//! Tool-specific error types.

use thiserror::Error;

/// Errors raised by the registry and dispatcher before a handler runs.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool name is not registered.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The arguments failed schema validation. The message names the
    /// offending field(s).
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// An internal dispatch error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "unknown tool" error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
