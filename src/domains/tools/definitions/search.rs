//! Catalog search tool.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::Tool,
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::domains::provider::ItemKind;
use crate::domains::tools::response::ToolResponse;
use crate::domains::tools::service::SpotifyService;

/// Parameters for catalog search.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// Free-text search query.
    #[schemars(description = "Search query text")]
    pub query: String,

    /// Item kinds to search for, comma-separated.
    #[schemars(
        description = "Kinds to search: track, album, artist, playlist, or a comma-separated combination (default: track)"
    )]
    #[serde(default)]
    pub kinds: Option<String>,

    /// Maximum number of results per kind (default: 10, max: 50).
    #[schemars(description = "Maximum number of results per kind (default: 10, max: 50)")]
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

/// Search tool implementation.
#[derive(Debug, Clone)]
pub struct SearchTool;

impl SearchTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "spotify_search";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search Spotify for tracks, albums, artists, or playlists by text query. Returns normalized records with ids and URIs usable by the playback and playlist tools. No side effects.";

    pub async fn execute(service: &SpotifyService, params: SearchParams) -> ToolResponse {
        let kinds = match parse_kinds(params.kinds.as_deref()) {
            Ok(kinds) => kinds,
            Err(response) => return response,
        };

        match service
            .adapter()
            .search(&params.query, &kinds, params.limit)
            .await
        {
            Ok(results) => ToolResponse::ok(results),
            Err(e) => e.into(),
        }
    }

    /// Validate arguments and run; the single entry point used by both
    /// the router and the registry.
    pub async fn run(
        service: &SpotifyService,
        arguments: serde_json::Map<String, Value>,
    ) -> ToolResponse {
        match serde_json::from_value::<SearchParams>(Value::Object(arguments)) {
            Ok(params) => Self::execute(service, params).await,
            Err(e) => ToolResponse::invalid_arguments(e.to_string()),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<SearchParams>().into(),
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

fn parse_kinds(kinds: Option<&str>) -> Result<Vec<ItemKind>, ToolResponse> {
    let Some(raw) = kinds else {
        return Ok(vec![ItemKind::Track]);
    };

    let mut parsed = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match ItemKind::parse(part) {
            Some(kind) => parsed.push(kind),
            None => {
                return Err(ToolResponse::invalid_arguments(format!(
                    "kinds: unknown item kind '{part}' (expected track, album, artist or playlist)"
                )));
            }
        }
    }

    if parsed.is_empty() {
        parsed.push(ItemKind::Track);
    }
    Ok(parsed)
}
