//! Tool Registry - central registration and dispatch for all tools.
//!
//! The registry is the single source of truth for the tool set. Dispatch
//! validates arguments against the tool's typed schema before any handler
//! logic runs; a call with an unknown name or invalid arguments never
//! reaches the provider adapter.

use std::sync::Arc;

use rmcp::model::Tool;
use tracing::{info, warn};

use super::definitions::{ItemInfoTool, PlaybackTool, PlaylistTool, QueueTool, SearchTool};
use super::response::ToolResponse;
use super::service::SpotifyService;

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    service: Arc<SpotifyService>,
}

impl ToolRegistry {
    /// Create a new tool registry over the shared service.
    pub fn new(service: Arc<SpotifyService>) -> Self {
        Self { service }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            ItemInfoTool::NAME,
            PlaybackTool::NAME,
            PlaylistTool::NAME,
            QueueTool::NAME,
            SearchTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            ItemInfoTool::to_tool(),
            PlaybackTool::to_tool(),
            PlaylistTool::to_tool(),
            QueueTool::to_tool(),
            SearchTool::to_tool(),
        ]
    }

    /// Dispatch a tool call by name.
    ///
    /// Always terminates in exactly one response envelope: unknown names
    /// and schema violations come back as error envelopes, handler
    /// results and provider failures likewise.
    pub async fn dispatch(&self, name: &str, arguments: serde_json::Value) -> ToolResponse {
        info!("Dispatching tool call: {}", name);

        let arguments = match arguments {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => serde_json::Map::new(),
            _ => {
                return ToolResponse::invalid_arguments("arguments must be a JSON object");
            }
        };

        match name {
            ItemInfoTool::NAME => ItemInfoTool::run(&self.service, arguments).await,
            PlaybackTool::NAME => PlaybackTool::run(&self.service, arguments).await,
            PlaylistTool::NAME => PlaylistTool::run(&self.service, arguments).await,
            QueueTool::NAME => QueueTool::run(&self.service, arguments).await,
            SearchTool::NAME => SearchTool::run(&self.service, arguments).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                ToolResponse::from(super::error::ToolError::unknown_tool(name))
            }
        }
    }
}
