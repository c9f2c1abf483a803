//! Tool categories and the registration dispatcher.
//!
//! Each category groups related tools that can be enabled or disabled as a
//! unit. The dispatcher computes the effective category set once at startup
//! and runs each active category's registrar against the server and shared
//! context. Categories reserved for future tool sets have no registrar and
//! are skipped silently.

mod accounts;
mod d1;
mod kv;
mod r2;
mod result;
mod workers;
mod zones;

pub use result::{missing_account_id, ToolContent, ToolResult, MISSING_ACCOUNT_ID_TEXT};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

use crate::mcp::context::PluginContext;
use crate::mcp::server::McpServer;
use crate::utils::error::McpError;

/// Tool registration function type
pub type ToolRegistrar = fn(&McpServer, &Arc<PluginContext>);

/// Tool categories available in the plugin. The set is closed and known at
/// build time; several tags are reserved for tool sets that are not
/// implemented yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolCategory {
    /// Account listing and active-account management
    #[serde(rename = "accounts")]
    Accounts,
    /// Worker script management
    #[serde(rename = "workers")]
    Workers,
    /// Workers KV namespace management
    #[serde(rename = "kv")]
    Kv,
    /// R2 bucket management
    #[serde(rename = "r2")]
    R2,
    /// D1 database management
    #[serde(rename = "d1")]
    D1,
    /// Reserved
    #[serde(rename = "hyperdrive")]
    Hyperdrive,
    /// Zone and DNS record management
    #[serde(rename = "zones")]
    Zones,
    /// Reserved
    #[serde(rename = "radar")]
    Radar,
    /// Reserved
    #[serde(rename = "url-scanner")]
    UrlScanner,
    /// Reserved
    #[serde(rename = "browser")]
    Browser,
    /// Reserved
    #[serde(rename = "ai-gateway")]
    AiGateway,
    /// Reserved
    #[serde(rename = "workers-builds")]
    WorkersBuilds,
    /// Reserved
    #[serde(rename = "workers-observability")]
    WorkersObservability,
    /// Reserved
    #[serde(rename = "auditlogs")]
    AuditLogs,
    /// Reserved
    #[serde(rename = "logpush")]
    Logpush,
    /// Reserved
    #[serde(rename = "dns-analytics")]
    DnsAnalytics,
    /// Reserved
    #[serde(rename = "graphql")]
    Graphql,
    /// Reserved
    #[serde(rename = "autorag")]
    Autorag,
    /// Reserved
    #[serde(rename = "casb")]
    Casb,
    /// Reserved
    #[serde(rename = "dex")]
    Dex,
}

impl ToolCategory {
    /// Returns the category's wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolCategory::Accounts => "accounts",
            ToolCategory::Workers => "workers",
            ToolCategory::Kv => "kv",
            ToolCategory::R2 => "r2",
            ToolCategory::D1 => "d1",
            ToolCategory::Hyperdrive => "hyperdrive",
            ToolCategory::Zones => "zones",
            ToolCategory::Radar => "radar",
            ToolCategory::UrlScanner => "url-scanner",
            ToolCategory::Browser => "browser",
            ToolCategory::AiGateway => "ai-gateway",
            ToolCategory::WorkersBuilds => "workers-builds",
            ToolCategory::WorkersObservability => "workers-observability",
            ToolCategory::AuditLogs => "auditlogs",
            ToolCategory::Logpush => "logpush",
            ToolCategory::DnsAnalytics => "dns-analytics",
            ToolCategory::Graphql => "graphql",
            ToolCategory::Autorag => "autorag",
            ToolCategory::Casb => "casb",
            ToolCategory::Dex => "dex",
        }
    }

    /// Returns the registrar for this category, or `None` for reserved
    /// categories that have no tools yet. Absence is a valid state, not an
    /// error.
    pub fn registrar(&self) -> Option<ToolRegistrar> {
        match self {
            ToolCategory::Accounts => Some(accounts::register_account_tools),
            ToolCategory::Workers => Some(workers::register_workers_tools),
            ToolCategory::Kv => Some(kv::register_kv_tools),
            ToolCategory::R2 => Some(r2::register_r2_tools),
            ToolCategory::D1 => Some(d1::register_d1_tools),
            ToolCategory::Zones => Some(zones::register_zone_tools),
            _ => None,
        }
    }
}

impl fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolCategory {
    type Err = McpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accounts" => Ok(ToolCategory::Accounts),
            "workers" => Ok(ToolCategory::Workers),
            "kv" => Ok(ToolCategory::Kv),
            "r2" => Ok(ToolCategory::R2),
            "d1" => Ok(ToolCategory::D1),
            "hyperdrive" => Ok(ToolCategory::Hyperdrive),
            "zones" => Ok(ToolCategory::Zones),
            "radar" => Ok(ToolCategory::Radar),
            "url-scanner" => Ok(ToolCategory::UrlScanner),
            "browser" => Ok(ToolCategory::Browser),
            "ai-gateway" => Ok(ToolCategory::AiGateway),
            "workers-builds" => Ok(ToolCategory::WorkersBuilds),
            "workers-observability" => Ok(ToolCategory::WorkersObservability),
            "auditlogs" => Ok(ToolCategory::AuditLogs),
            "logpush" => Ok(ToolCategory::Logpush),
            "dns-analytics" => Ok(ToolCategory::DnsAnalytics),
            "graphql" => Ok(ToolCategory::Graphql),
            "autorag" => Ok(ToolCategory::Autorag),
            "casb" => Ok(ToolCategory::Casb),
            "dex" => Ok(ToolCategory::Dex),
            other => Err(McpError::Config(format!("unknown tool category '{}'", other))),
        }
    }
}

/// Categories enabled when the configuration does not name any
pub const DEFAULT_CATEGORIES: &[ToolCategory] = &[
    ToolCategory::Accounts,
    ToolCategory::Workers,
    ToolCategory::Kv,
    ToolCategory::R2,
    ToolCategory::D1,
    ToolCategory::Zones,
];

/// Category selection for [`register_tools`]
#[derive(Debug, Clone, Default)]
pub struct RegisterOptions {
    /// Categories to enable. `None` falls back to [`DEFAULT_CATEGORIES`];
    /// `Some(vec![])` registers nothing at all. The distinction matters.
    pub enabled_categories: Option<Vec<ToolCategory>>,

    /// Categories to subtract from the enabled set
    pub disabled_categories: Vec<ToolCategory>,
}

/// Registers all tools from the effective category set against the server,
/// closing each handler over the shared context. Runs once per process at
/// startup; the tool set is fixed afterwards.
pub fn register_tools(server: &McpServer, context: &Arc<PluginContext>, options: &RegisterOptions) {
    let categories: Vec<ToolCategory> = options
        .enabled_categories
        .clone()
        .unwrap_or_else(|| DEFAULT_CATEGORIES.to_vec());

    for category in categories
        .iter()
        .filter(|category| !options.disabled_categories.contains(category))
    {
        match category.registrar() {
            Some(register) => {
                register(server, context);
                debug!(category = %category, "registered category tools");
            }
            None => {
                debug!(category = %category, "category reserved, no tools to register");
            }
        }
    }
}

/// Resolves the account id for a handler, or short-circuits with the result
/// the handler must return: the sentinel when no account is usable, or a
/// failure envelope when resolution itself hit a provider error.
pub(crate) async fn require_account(
    context: &PluginContext,
    action: &str,
) -> Result<String, ToolResult> {
    match context.account_id().await {
        Ok(Some(account_id)) => Ok(account_id),
        Ok(None) => Err(missing_account_id()),
        Err(e) => Err(ToolResult::error(e, action)),
    }
}
