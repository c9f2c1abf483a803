#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! Cloudflare management tools served over the Model Context Protocol.
//!
//! This crate exposes Cloudflare's management API (accounts, Workers, KV,
//! R2, D1, zones) as named, schema-described tools that any MCP client can
//! discover and invoke over stdio. Tool categories can be enabled and
//! disabled selectively, and every tool call operates under a resolved
//! account scope managed by a shared [`PluginContext`].
//!
//! ## Basic usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use mcp_cloudflare::{McpServer, PluginConfig, PluginContext, RegisterOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PluginConfig::from_env()?;
//!     let context = Arc::new(PluginContext::new(&config)?);
//!
//!     let server = McpServer::new("cloudflare-mcp", env!("CARGO_PKG_VERSION"));
//!     mcp_cloudflare::register_tools(
//!         &server,
//!         &context,
//!         &RegisterOptions {
//!             enabled_categories: config.enabled_categories.clone(),
//!             disabled_categories: config.disabled_categories.clone(),
//!         },
//!     );
//!
//!     server.run().await?;
//!     Ok(())
//! }
//! ```

/// Typed client for the Cloudflare v4 API.
pub mod cloudflare;

/// Plugin configuration and environment parsing.
pub mod config;

/// MCP protocol server, shared context, and tool registration.
pub mod mcp;

/// Utility modules for error handling and common functionality.
pub mod utils;

pub use cloudflare::{Account, CloudflareClient};
pub use config::PluginConfig;
pub use mcp::context::{AccountsProvider, PluginContext};
pub use mcp::server::{McpServer, Tool};
pub use mcp::tools::{
    missing_account_id, register_tools, RegisterOptions, ToolCategory, ToolResult,
    DEFAULT_CATEGORIES, MISSING_ACCOUNT_ID_TEXT,
};
pub use utils::error::{McpError, McpResult};
