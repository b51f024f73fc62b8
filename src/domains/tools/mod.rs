//! Tools domain.
//!
//! MCP tool surface over the provider adapter. Tool definitions live in
//! `definitions/`, one file per tool; the registry and router expose
//! them to dispatchers and to the rmcp server respectively.

pub mod definitions;
pub mod error;
pub mod registry;
pub mod response;
pub mod router;
pub mod service;

#[cfg(test)]
pub mod testing;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use response::{ErrorKind, ToolResponse};
pub use router::build_tool_router;
pub use service::SpotifyService;
