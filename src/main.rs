//! MCP Server Entry Point
//!
//! This is the main entry point for the MCP server. It initializes logging,
//! loads configuration, wires the Spotify adapter stack, and starts the
//! server with the configured transport.

use std::sync::Arc;

use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use spotify_mcp_server::core::{Config, McpServer, TransportService};
use spotify_mcp_server::domains::auth::{CredentialStore, SpotifyTokenExchanger};
use spotify_mcp_server::domains::provider::{RateLimiter, ReqwestTransport, SpotifyAdapter};
use spotify_mcp_server::domains::tools::SpotifyService;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Arc::new(Config::from_env());

    // Initialize logging
    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);

    // Wire the provider stack: credential store, HTTP transport,
    // rate limiter and adapter.
    let exchanger = SpotifyTokenExchanger::new(
        reqwest::Client::new(),
        config.spotify.token_url.clone(),
        config.spotify.client_id.clone(),
        config.spotify.client_secret.clone(),
    );
    let store = Arc::new(CredentialStore::load(
        Box::new(exchanger),
        config.spotify.credentials_path.clone(),
    )?);

    let transport = Arc::new(ReqwestTransport::new(config.spotify.request_timeout_secs)?);
    let limiter = Arc::new(RateLimiter::new());
    let adapter = SpotifyAdapter::new(
        transport,
        store,
        limiter,
        config.spotify.api_base.clone(),
        config.spotify.max_attempts,
    );

    let service = Arc::new(SpotifyService::new(adapter));

    // Create the MCP server
    let server = McpServer::new(config.clone(), service);

    info!("Server initialized");

    // Create and run the transport service
    let transport = TransportService::new(config.transport.clone());
    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Configures tracing with the specified log level and format. Logs go
/// to stderr so stdout stays clean for the MCP protocol.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
