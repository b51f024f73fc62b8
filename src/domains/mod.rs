//! Business domains.
//!
//! Each domain owns one concern end to end: `auth` holds the OAuth
//! session and refresh machinery, `provider` talks to the streaming
//! API, `tools` exposes the MCP tool surface over both.

pub mod auth;
pub mod provider;
pub mod tools;
