//! Daemon entry point for the DraCor MCP server.
//!
//! Loads configuration from the environment, builds the API client, and
//! serves the MCP protocol over streamable HTTP or stdio.

mod config;

use std::sync::Arc;

use dracor_core::client::{ClientConfig, DracorClient};
use dracor_mcp::server::{McpHttpServerConfig, serve_stdio, serve_streamable_http};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::DracorConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Log to stderr so the stdio transport keeps stdout for the protocol.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let config = DracorConfig::from_args()?;
    let client_config = ClientConfig::new(&config.api_base_url)
        .with_credentials(&config.existdb_admin, &config.existdb_pwd)
        .with_timeout(config.timeout);
    let client = Arc::new(DracorClient::new(client_config)?);

    if config.enable_stdio {
        info!(base_url = %client.base_url(), "serving MCP over stdio");
        serve_stdio(client).await?;
    } else {
        info!(base_url = %client.base_url(), addr = %config.mcp_http_addr, "serving MCP over streamable HTTP");
        serve_streamable_http(client, McpHttpServerConfig::new(config.mcp_http_addr)).await?;
    }
    Ok(())
}
