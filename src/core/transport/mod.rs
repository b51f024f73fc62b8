//! Transport layer for the MCP server.
//!
//! The server speaks MCP over STDIO, the standard mode for locally
//! spawned servers. The transport handles the connection lifecycle and
//! delegates message processing to the MCP server handler.

mod config;
mod error;
mod service;

pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;
