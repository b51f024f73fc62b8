//! The uniform tool response envelope.
//!
//! Every tool call terminates in exactly one of these, success or error.
//! Error kinds form a closed taxonomy; raw provider bodies and stack
//! traces never reach the caller.

use rmcp::model::{CallToolResult, Content};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domains::auth::AuthError;
use crate::domains::provider::AdapterError;

use super::error::ToolError;

/// Machine-readable error classes surfaced to MCP callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    UnknownTool,
    InvalidArguments,
    Unauthenticated,
    Forbidden,
    NotFound,
    RateLimited,
    ProviderUnavailable,
    InternalError,
}

/// The response envelope returned for every tool call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ToolResponse {
    Ok {
        payload: serde_json::Value,
    },
    Error {
        kind: ErrorKind,
        message: String,
    },
}

impl ToolResponse {
    /// Wrap a successful payload.
    pub fn ok(payload: impl Serialize) -> Self {
        match serde_json::to_value(payload) {
            Ok(payload) => Self::Ok { payload },
            Err(e) => Self::error(
                ErrorKind::InternalError,
                format!("failed to serialize payload: {e}"),
            ),
        }
    }

    /// An ok envelope with an empty payload, for ack-style operations.
    pub fn ok_empty() -> Self {
        Self::Ok {
            payload: serde_json::json!({}),
        }
    }

    pub fn error(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::Error {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::error(ErrorKind::InvalidArguments, message)
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    /// Render into the MCP call result. Errors are marked so clients can
    /// distinguish them without parsing the envelope.
    pub fn into_call_result(self) -> CallToolResult {
        let is_error = !self.is_ok();
        if let Self::Error { kind, message } = &self {
            warn!("Tool call failed: {:?}: {}", kind, message);
        }

        let text = serde_json::to_string_pretty(&self)
            .unwrap_or_else(|_| r#"{"status":"error","kind":"InternalError","message":"unserializable envelope"}"#.to_string());

        if is_error {
            CallToolResult::error(vec![Content::text(text)])
        } else {
            CallToolResult::success(vec![Content::text(text)])
        }
    }
}

impl From<&AdapterError> for ErrorKind {
    fn from(err: &AdapterError) -> Self {
        match err {
            AdapterError::Unauthenticated(_) => Self::Unauthenticated,
            AdapterError::Forbidden(_) => Self::Forbidden,
            AdapterError::NotFound(_) => Self::NotFound,
            AdapterError::InvalidArgument(_) => Self::InvalidArguments,
            AdapterError::RateLimited => Self::RateLimited,
            AdapterError::ProviderUnavailable(_) => Self::ProviderUnavailable,
            AdapterError::Internal(_) => Self::InternalError,
        }
    }
}

impl From<AdapterError> for ToolResponse {
    fn from(err: AdapterError) -> Self {
        Self::error(ErrorKind::from(&err), err.to_string())
    }
}

impl From<ToolError> for ToolResponse {
    fn from(err: ToolError) -> Self {
        let kind = match &err {
            ToolError::UnknownTool(_) => ErrorKind::UnknownTool,
            ToolError::InvalidArguments(_) => ErrorKind::InvalidArguments,
            ToolError::Internal(_) => ErrorKind::InternalError,
        };
        Self::error(kind, err.to_string())
    }
}

impl From<AuthError> for ToolResponse {
    fn from(err: AuthError) -> Self {
        ToolResponse::from(AdapterError::from(err))
    }
}
