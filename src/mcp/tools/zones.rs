use serde_json::{json, Value};
use std::sync::Arc;

use crate::cloudflare::{DnsRecordListParams, ZoneListParams};
use crate::mcp::context::PluginContext;
use crate::mcp::server::McpServer;

use super::require_account;
use super::result::ToolResult;

/// Registers Zone management tools
pub fn register_zone_tools(server: &McpServer, context: &Arc<PluginContext>) {
    let ctx = context.clone();
    server.tool(
        "zones_list",
        "List all zones under a Cloudflare account",
        json!({
            "type": "object",
            "properties": {
                "name": { "type": "string", "description": "Filter zones by name" },
                "status": {
                    "type": "string",
                    "description": "Filter zones by status (active, pending, initializing, moved, deleted, deactivated, read only)"
                },
                "page": {
                    "type": "number",
                    "minimum": 1,
                    "default": 1,
                    "description": "Page number for pagination"
                },
                "per_page": {
                    "type": "number",
                    "minimum": 5,
                    "maximum": 1000,
                    "default": 50,
                    "description": "Number of zones per page"
                },
                "order": {
                    "type": "string",
                    "enum": ["name", "status", "account.name"],
                    "default": "name",
                    "description": "Field to order results by"
                },
                "direction": {
                    "type": "string",
                    "enum": ["asc", "desc"],
                    "default": "desc",
                    "description": "Direction to order results"
                }
            }
        }),
        move |args: Value| {
            let ctx = ctx.clone();
            async move {
                let account_id = match require_account(&ctx, "listing zones").await {
                    Ok(id) => id,
                    Err(result) => return result,
                };
                let params: ZoneListParams = match serde_json::from_value(args) {
                    Ok(params) => params,
                    Err(e) => return ToolResult::error(e, "listing zones"),
                };

                match ctx.client().list_zones(&account_id, &params).await {
                    Ok(zones) => ToolResult::json(&json!({
                        "zones": zones,
                        "count": zones.len(),
                        "page": params.page.unwrap_or(1),
                        "per_page": params.per_page.unwrap_or(50),
                        "accountId": account_id,
                    })),
                    Err(e) => ToolResult::error(e, "listing zones"),
                }
            }
        },
    );

    let ctx = context.clone();
    server.tool(
        "zone_details",
        "Get details for a specific Cloudflare zone",
        json!({
            "type": "object",
            "properties": {
                "zoneId": {
                    "type": "string",
                    "description": "The ID of the zone to get details for"
                }
            },
            "required": ["zoneId"]
        }),
        move |args: Value| {
            let ctx = ctx.clone();
            async move {
                if let Err(result) = require_account(&ctx, "fetching zone details").await {
                    return result;
                }
                let zone_id = match args.get("zoneId").and_then(|v| v.as_str()) {
                    Some(id) => id.to_string(),
                    None => return ToolResult::error("zoneId is required", "fetching zone details"),
                };

                match ctx.client().get_zone(&zone_id).await {
                    Ok(zone) => ToolResult::json(&json!({ "zone": zone })),
                    Err(e) => ToolResult::error(e, "fetching zone details"),
                }
            }
        },
    );

    // Zone-scoped endpoint; intentionally not gated on a resolved account id.
    let ctx = context.clone();
    server.tool(
        "zone_dns_records_list",
        "List DNS records for a specific Cloudflare zone",
        json!({
            "type": "object",
            "properties": {
                "zoneId": { "type": "string", "description": "The ID of the zone" },
                "type": {
                    "type": "string",
                    "description": "Filter by record type (A, AAAA, CNAME, TXT, MX, etc.)"
                },
                "page": {
                    "type": "number",
                    "minimum": 1,
                    "default": 1,
                    "description": "Page number"
                },
                "per_page": {
                    "type": "number",
                    "minimum": 5,
                    "maximum": 1000,
                    "default": 50,
                    "description": "Records per page"
                }
            },
            "required": ["zoneId"]
        }),
        move |args: Value| {
            let ctx = ctx.clone();
            async move {
                let zone_id = match args.get("zoneId").and_then(|v| v.as_str()) {
                    Some(id) => id.to_string(),
                    None => return ToolResult::error("zoneId is required", "listing DNS records"),
                };
                let params: DnsRecordListParams = match serde_json::from_value(args) {
                    Ok(params) => params,
                    Err(e) => return ToolResult::error(e, "listing DNS records"),
                };

                match ctx.client().list_dns_records(&zone_id, &params).await {
                    Ok(records) => ToolResult::json(&json!({
                        "records": records,
                        "count": records.len(),
                    })),
                    Err(e) => ToolResult::error(e, "listing DNS records"),
                }
            }
        },
    );
}
