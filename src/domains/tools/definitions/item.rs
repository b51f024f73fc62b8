//! Catalog item lookup tool.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::Tool,
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::domains::tools::response::ToolResponse;
use crate::domains::tools::service::SpotifyService;

/// Parameters for item lookup.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ItemInfoParams {
    /// URI of the item to look up.
    #[schemars(
        description = "Spotify URI or open.spotify.com link of a track, album, artist or playlist. Albums and playlists include their tracks; artists include top tracks and albums."
    )]
    pub item_uri: String,
}

/// Item lookup tool implementation.
#[derive(Debug, Clone)]
pub struct ItemInfoTool;

impl ItemInfoTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "spotify_item_info";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get detailed information about a Spotify item by URI: track, album (with tracks), artist (with top tracks and albums), or playlist (with tracks). No side effects.";

    pub async fn execute(service: &SpotifyService, params: ItemInfoParams) -> ToolResponse {
        match service.adapter().item_info(&params.item_uri).await {
            Ok(info) => ToolResponse::ok(info),
            Err(e) => e.into(),
        }
    }

    /// Validate arguments and run.
    pub async fn run(
        service: &SpotifyService,
        arguments: serde_json::Map<String, Value>,
    ) -> ToolResponse {
        match serde_json::from_value::<ItemInfoParams>(Value::Object(arguments)) {
            Ok(params) => Self::execute(service, params).await,
            Err(e) => ToolResponse::invalid_arguments(e.to_string()),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<ItemInfoParams>().into(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute bound to the shared service.
    pub fn create_route<S>(service: Arc<SpotifyService>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let service = service.clone();
            let args = ctx.arguments.clone().unwrap_or_default();
            async move { Ok(Self::run(&service, args).await.into_call_result()) }.boxed()
        })
    }
}
