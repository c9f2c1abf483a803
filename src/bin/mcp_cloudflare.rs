//! Stdio entry point for the Cloudflare MCP server.
//!
//! Usage:
//!
//! ```text
//! CLOUDFLARE_API_TOKEN=xxx mcp-cloudflare
//! ```
//!
//! Or in an MCP client configuration:
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "cloudflare": {
//!       "command": "mcp-cloudflare",
//!       "env": { "CLOUDFLARE_API_TOKEN": "your-api-token" }
//!     }
//!   }
//! }
//! ```

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mcp_cloudflare::config::ENV_API_TOKEN;
use mcp_cloudflare::{register_tools, McpServer, PluginConfig, PluginContext, RegisterOptions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Stdout carries the protocol; all diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = PluginConfig::from_env().with_context(|| {
        format!(
            "configuration error; set {} (get a token at https://dash.cloudflare.com/profile/api-tokens)",
            ENV_API_TOKEN
        )
    })?;

    let context = Arc::new(PluginContext::new(&config).context("failed to create API client")?);

    let server = McpServer::new("cloudflare-mcp", env!("CARGO_PKG_VERSION"));
    register_tools(
        &server,
        &context,
        &RegisterOptions {
            enabled_categories: config.enabled_categories.clone(),
            disabled_categories: config.disabled_categories.clone(),
        },
    );

    info!(tool_count = server.tool_count(), "Cloudflare MCP server started");
    if let Some(account_id) = &config.account_id {
        info!(account_id = %account_id, "using configured account ID");
    }
    if let Some(enabled) = &config.enabled_categories {
        let names: Vec<&str> = enabled.iter().map(|c| c.as_str()).collect();
        info!(categories = names.join(",").as_str(), "enabled categories");
    }

    server.run().await.context("server terminated with error")?;
    Ok(())
}
