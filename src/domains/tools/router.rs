//! Tool router construction for the rmcp server.
//!
//! Builds the `ToolRouter` the MCP handler serves from, with every tool
//! route bound to the shared [`SpotifyService`].

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{ItemInfoTool, PlaybackTool, PlaylistTool, QueueTool, SearchTool};
use super::service::SpotifyService;

/// Build the complete tool router over a shared service handle.
pub fn build_tool_router<S>(service: Arc<SpotifyService>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(SearchTool::create_route(service.clone()))
        .with_route(PlaybackTool::create_route(service.clone()))
        .with_route(QueueTool::create_route(service.clone()))
        .with_route(PlaylistTool::create_route(service.clone()))
        .with_route(ItemInfoTool::create_route(service))
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::super::testing::service_fixture;
    use super::*;

    #[test]
    fn test_router_lists_every_registered_tool() {
        let (service, _) = service_fixture();
        let router: ToolRouter<()> = build_tool_router(service.clone());

        let mut routed: Vec<String> = router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        routed.sort();

        let mut registered: Vec<String> = ToolRegistry::new(service)
            .tool_names()
            .into_iter()
            .map(String::from)
            .collect();
        registered.sort();

        assert_eq!(routed, registered);
    }

    #[test]
    fn test_router_tools_have_schemas() {
        let (service, _) = service_fixture();
        let router: ToolRouter<()> = build_tool_router(service);

        for tool in router.list_all() {
            assert!(
                tool.input_schema.contains_key("properties"),
                "tool {} is missing an input schema",
                tool.name
            );
            assert!(tool.description.is_some());
        }
    }
}
