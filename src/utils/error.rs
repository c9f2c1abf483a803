//! Error types shared across the crate.

use thiserror::Error;

/// A specialized Result type for MCP operations.
pub type McpResult<T> = Result<T, McpError>;

/// Represents errors that can occur while serving Cloudflare tools.
#[derive(Debug, Error)]
pub enum McpError {
    /// Invalid or missing configuration
    #[error("Config error: {0}")]
    Config(String),

    /// The Cloudflare API returned an unsuccessful response
    #[error("Cloudflare API error: {0}")]
    Api(String),

    /// HTTP transport failure while calling the Cloudflare API
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error during read/write operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No tool registered under the requested name
    #[error("Tool '{0}' not found")]
    ToolNotFound(String),
}
