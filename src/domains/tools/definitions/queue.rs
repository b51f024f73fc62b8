//! Playback queue tool.

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

/// Parameters for queue management.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct QueueParams {
    /// The queue action to perform.
    #[schemars(description = "Action to perform: 'add' or 'get'")]
    pub action: String,

    /// Track to append for the 'add' action.
    #[schemars(description = "Track id or URI to add to the queue (required for 'add')")]
    #[serde(default)]
    pub track_id: Option<String>,
}

/// Queue management tool implementation.
#[derive(Debug, Clone)]
pub struct QueueTool;

impl QueueTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "spotify_queue";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Manage the Spotify playback queue: view what is coming up or add a track. Side effects: 'add' modifies the user's queue.";

    pub async fn execute(service: &SpotifyService, params: QueueParams) -> ToolResponse {
        let adapter = service.adapter();

        match params.action.as_str() {
            "add" => {
                let Some(track_id) = params.track_id.as_deref() else {
                    return ToolResponse::invalid_arguments(
                        "track_id: required for the 'add' action",
                    );
                };
                match adapter.queue_add(track_id).await {
                    Ok(()) => ToolResponse::ok_empty(),
                    Err(e) => e.into(),
                }
            }

            "get" => match adapter.queue_list().await {
                Ok(queue) => ToolResponse::ok(queue),
                Err(e) => e.into(),
            },

            other => ToolResponse::invalid_arguments(format!(
                "action: unknown action '{other}' (expected add or get)"
            )),
        }
    }

    /// Validate arguments and run.
    pub async fn run(
        service: &SpotifyService,
        arguments: serde_json::Map<String, Value>,
    ) -> ToolResponse {
        match serde_json::from_value::<QueueParams>(Value::Object(arguments)) {
            Ok(params) => Self::execute(service, params).await,
            Err(e) => ToolResponse::invalid_arguments(e.to_string()),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<QueueParams>().into(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::testing::service_fixture;
    use serde_json::json;

    fn args(value: Value) -> serde_json::Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[tokio::test]
    async fn test_add_requires_track_id() {
        let (service, transport) = service_fixture();
        let response = QueueTool::run(&service, args(json!({"action": "add"}))).await;

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["kind"], "InvalidArguments");
        assert!(value["message"].as_str().unwrap().contains("track_id"));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_add_track() {
        let (service, transport) = service_fixture();
        transport.respond(204);

        let response = QueueTool::run(
            &service,
            args(json!({"action": "add", "track_id": "spotify:track:t1"})),
        )
        .await;
        assert!(response.is_ok());
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_get_queue() {
        let (service, transport) = service_fixture();
        transport.respond_json(
            200,
            json!({
                "currently_playing": {"id": "t1", "name": "Now"},
                "queue": [{"id": "t2", "name": "Next"}]
            }),
        );

        let response = QueueTool::run(&service, args(json!({"action": "get"}))).await;
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["payload"]["queue"][0]["name"], "Next");
    }
}
