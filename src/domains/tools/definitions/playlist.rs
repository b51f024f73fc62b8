//! Playlist management tool.

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

/// Parameters for playlist management.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PlaylistParams {
    /// The playlist action to perform.
    #[schemars(
        description = "Action to perform: 'get', 'get_tracks', 'add_tracks', 'remove_tracks' or 'change_details'"
    )]
    pub action: String,

    /// Target playlist for all actions except 'get'.
    #[schemars(description = "Playlist id (required for all actions except 'get')")]
    #[serde(default)]
    pub playlist_id: Option<String>,

    /// Tracks for 'add_tracks' / 'remove_tracks'.
    #[schemars(description = "Track ids or URIs to add or remove")]
    #[serde(default)]
    pub track_ids: Option<Vec<String>>,

    /// New playlist name for 'change_details'.
    #[schemars(description = "New name for the playlist")]
    #[serde(default)]
    pub name: Option<String>,

    /// New playlist description for 'change_details'.
    #[schemars(description = "New description for the playlist")]
    #[serde(default)]
    pub description: Option<String>,

    /// Pagination cursor from a previous 'get'/'get_tracks' page.
    #[schemars(description = "Opaque cursor from a previous page, to continue listing")]
    #[serde(default)]
    pub cursor: Option<String>,
}

/// Playlist management tool implementation.
#[derive(Debug, Clone)]
pub struct PlaylistTool;

impl PlaylistTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "spotify_playlist";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Manage Spotify playlists: list the user's playlists, list a playlist's tracks, add or remove tracks, or change name/description. Listing actions are paginated via an opaque cursor. Side effects: may modify playlist contents or details.";

    pub async fn execute(service: &SpotifyService, params: PlaylistParams) -> ToolResponse {
        let adapter = service.adapter();

        match params.action.as_str() {
            "get" => match adapter.list_playlists(params.cursor.as_deref()).await {
                Ok(page) => ToolResponse::ok(page),
                Err(e) => e.into(),
            },

            "get_tracks" => {
                let Some(playlist_id) = params.playlist_id.as_deref() else {
                    return missing("playlist_id", "get_tracks");
                };
                match adapter
                    .playlist_tracks(playlist_id, params.cursor.as_deref())
                    .await
                {
                    Ok(page) => ToolResponse::ok(page),
                    Err(e) => e.into(),
                }
            }

            "add_tracks" => {
                let Some(playlist_id) = params.playlist_id.as_deref() else {
                    return missing("playlist_id", "add_tracks");
                };
                let Some(track_ids) = params.track_ids.as_deref() else {
                    return missing("track_ids", "add_tracks");
                };
                match adapter.playlist_add_tracks(playlist_id, track_ids).await {
                    Ok(()) => ToolResponse::ok_empty(),
                    Err(e) => e.into(),
                }
            }

            "remove_tracks" => {
                let Some(playlist_id) = params.playlist_id.as_deref() else {
                    return missing("playlist_id", "remove_tracks");
                };
                let Some(track_ids) = params.track_ids.as_deref() else {
                    return missing("track_ids", "remove_tracks");
                };
                match adapter.playlist_remove_tracks(playlist_id, track_ids).await {
                    Ok(()) => ToolResponse::ok_empty(),
                    Err(e) => e.into(),
                }
            }

            "change_details" => {
                let Some(playlist_id) = params.playlist_id.as_deref() else {
                    return missing("playlist_id", "change_details");
                };
                match adapter
                    .playlist_change_details(
                        playlist_id,
                        params.name.as_deref(),
                        params.description.as_deref(),
                    )
                    .await
                {
                    Ok(()) => ToolResponse::ok_empty(),
                    Err(e) => e.into(),
                }
            }

            other => ToolResponse::invalid_arguments(format!(
                "action: unknown action '{other}' (expected get, get_tracks, add_tracks, remove_tracks or change_details)"
            )),
        }
    }

    /// Validate arguments and run.
    pub async fn run(
        service: &SpotifyService,
        arguments: serde_json::Map<String, Value>,
    ) -> ToolResponse {
        match serde_json::from_value::<PlaylistParams>(Value::Object(arguments)) {
            Ok(params) => Self::execute(service, params).await,
            Err(e) => ToolResponse::invalid_arguments(e.to_string()),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<PlaylistParams>().into(),
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

fn missing(field: &str, action: &str) -> ToolResponse {
    ToolResponse::invalid_arguments(format!("{field}: required for the '{action}' action"))
}
