//! Spotify MCP Server Library
//!
//! This crate exposes Spotify playback and catalog operations as Model
//! Context Protocol (MCP) tools, organized by domains.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Core infrastructure including configuration, error handling, and the main server
//! - **domains**: Business logic organized by bounded contexts
//!   - **auth**: OAuth session management and token refresh
//!   - **provider**: Spotify Web API adapter with rate limiting and retries
//!   - **tools**: MCP tools that can be executed by clients
//!
//! # Example
//!
//! ```rust,no_run
//! use spotify_mcp_server::core::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     // Wire up the credential store, adapter and server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
