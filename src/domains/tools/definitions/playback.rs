//! Playback control tool.
//!
//! One tool with an action verb, mirroring how agents think about
//! playback: get the current state, start or resume, pause, skip.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::Tool,
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::domains::tools::response::ToolResponse;
use crate::domains::tools::service::SpotifyService;

/// Parameters for playback control.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PlaybackParams {
    /// The playback action to perform.
    #[schemars(description = "Action to perform: 'get', 'start', 'pause' or 'skip'")]
    pub action: String,

    /// Spotify URI to play for the 'start' action; resume when omitted.
    #[schemars(
        description = "Spotify URI of the item to play for 'start'. If omitted, resumes current playback."
    )]
    #[serde(default)]
    pub uri: Option<String>,

    /// Target device; the active device when omitted.
    #[schemars(description = "Device id to target (defaults to the active device)")]
    #[serde(default)]
    pub device_id: Option<String>,

    /// Number of tracks to skip for the 'skip' action.
    #[schemars(description = "Number of tracks to skip for 'skip' (default: 1)")]
    #[serde(default = "default_skips")]
    pub num_skips: u32,

    /// Optional caller-supplied key deduplicating repeated 'start' calls.
    #[schemars(
        description = "Optional idempotency key; a repeated key turns 'start' into a no-op"
    )]
    #[serde(default)]
    pub idempotency_key: Option<String>,
}

fn default_skips() -> u32 {
    1
}

/// Playback control tool implementation.
#[derive(Debug, Clone)]
pub struct PlaybackTool;

impl PlaybackTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "spotify_playback";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Control Spotify playback: get the current track, start playing a URI or resume, pause, or skip tracks. Side effects: may start, pause or skip playback on the user's device.";

    pub async fn execute(service: &SpotifyService, params: PlaybackParams) -> ToolResponse {
        let adapter = service.adapter();

        match params.action.as_str() {
            "get" => match adapter.currently_playing().await {
                Ok(Some(state)) => ToolResponse::ok(state),
                Ok(None) => ToolResponse::ok(json!({ "message": "No track playing" })),
                Err(e) => e.into(),
            },

            "start" => {
                if let Some(key) = &params.idempotency_key {
                    if service.check_and_record_key(key) {
                        return ToolResponse::ok(json!({ "deduplicated": true }));
                    }
                }
                match adapter
                    .play(params.device_id.as_deref(), params.uri.as_deref())
                    .await
                {
                    Ok(()) => ToolResponse::ok_empty(),
                    Err(e) => e.into(),
                }
            }

            "pause" => match adapter.pause(params.device_id.as_deref()).await {
                Ok(()) => ToolResponse::ok_empty(),
                Err(e) => e.into(),
            },

            "skip" => match adapter.skip_next(params.num_skips).await {
                Ok(()) => ToolResponse::ok_empty(),
                Err(e) => e.into(),
            },

            other => ToolResponse::invalid_arguments(format!(
                "action: unknown action '{other}' (expected get, start, pause or skip)"
            )),
        }
    }

    /// Validate arguments and run.
    pub async fn run(
        service: &SpotifyService,
        arguments: serde_json::Map<String, Value>,
    ) -> ToolResponse {
        match serde_json::from_value::<PlaybackParams>(Value::Object(arguments)) {
            Ok(params) => Self::execute(service, params).await,
            Err(e) => ToolResponse::invalid_arguments(e.to_string()),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<PlaybackParams>().into(),
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
