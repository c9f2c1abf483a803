//! Plugin configuration and environment parsing.
//!
//! The binary is configured entirely through environment variables, the way
//! MCP clients launch stdio servers:
//!
//! - `CLOUDFLARE_API_TOKEN` (required)
//! - `CLOUDFLARE_ACCOUNT_ID` (optional, seeds the active account)
//! - `CLOUDFLARE_ENABLED_CATEGORIES` (optional, comma-separated)
//! - `CLOUDFLARE_DISABLED_CATEGORIES` (optional, comma-separated)

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::mcp::tools::ToolCategory;
use crate::utils::error::{McpError, McpResult};

/// Environment variable holding the API token
pub const ENV_API_TOKEN: &str = "CLOUDFLARE_API_TOKEN";

/// Environment variable seeding the active account id
pub const ENV_ACCOUNT_ID: &str = "CLOUDFLARE_ACCOUNT_ID";

/// Environment variable selecting enabled tool categories
pub const ENV_ENABLED_CATEGORIES: &str = "CLOUDFLARE_ENABLED_CATEGORIES";

/// Environment variable selecting disabled tool categories
pub const ENV_DISABLED_CATEGORIES: &str = "CLOUDFLARE_DISABLED_CATEGORIES";

/// Configuration for the Cloudflare MCP plugin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Cloudflare API token for authentication.
    /// Get one at <https://dash.cloudflare.com/profile/api-tokens>
    pub api_token: String,

    /// Optional account ID to use for API calls. If not provided, tools use
    /// the sole available account or require explicit account selection.
    #[serde(default)]
    pub account_id: Option<String>,

    /// Enable specific tool categories. `None` enables the default set;
    /// an explicitly empty list enables nothing.
    #[serde(default)]
    pub enabled_categories: Option<Vec<ToolCategory>>,

    /// Disable specific tool categories
    #[serde(default)]
    pub disabled_categories: Vec<ToolCategory>,
}

impl PluginConfig {
    /// Builds a configuration from the process environment. A missing API
    /// token is fatal; everything else is optional.
    pub fn from_env() -> McpResult<Self> {
        let api_token = std::env::var(ENV_API_TOKEN).map_err(|_| {
            McpError::Config(format!("{} environment variable is required", ENV_API_TOKEN))
        })?;

        let account_id = std::env::var(ENV_ACCOUNT_ID).ok().filter(|s| !s.is_empty());

        let enabled_categories = std::env::var(ENV_ENABLED_CATEGORIES)
            .ok()
            .map(|raw| parse_categories(&raw));

        let disabled_categories = std::env::var(ENV_DISABLED_CATEGORIES)
            .ok()
            .map(|raw| parse_categories(&raw))
            .unwrap_or_default();

        Ok(Self {
            api_token,
            account_id,
            enabled_categories,
            disabled_categories,
        })
    }
}

/// Parses a comma-separated category list. Names that do not match any
/// known category are skipped with a warning; an empty string yields an
/// empty list, which is distinct from the variable being unset.
fn parse_categories(raw: &str) -> Vec<ToolCategory> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|name| match name.parse::<ToolCategory>() {
            Ok(category) => Some(category),
            Err(_) => {
                warn!(category = name, "ignoring unknown tool category");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_categories() {
        let categories = parse_categories("workers, kv,d1");
        assert_eq!(
            categories,
            vec![ToolCategory::Workers, ToolCategory::Kv, ToolCategory::D1]
        );
    }

    #[test]
    fn test_parse_categories_skips_unknown_names() {
        let categories = parse_categories("workers,definitely-not-real,zones");
        assert_eq!(categories, vec![ToolCategory::Workers, ToolCategory::Zones]);
    }

    #[test]
    fn test_parse_categories_empty_string_is_empty_list() {
        assert!(parse_categories("").is_empty());
    }
}
