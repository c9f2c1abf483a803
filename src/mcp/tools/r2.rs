use serde_json::{json, Value};
use std::sync::Arc;

use crate::cloudflare::R2BucketListParams;
use crate::mcp::context::PluginContext;
use crate::mcp::server::McpServer;

use super::require_account;
use super::result::ToolResult;

fn bucket_name_schema() -> Value {
    json!({ "type": "string", "description": "The name of the R2 bucket" })
}

/// Registers R2 bucket management tools
pub fn register_r2_tools(server: &McpServer, context: &Arc<PluginContext>) {
    let ctx = context.clone();
    server.tool(
        "r2_buckets_list",
        "List R2 buckets in your Cloudflare account",
        json!({
            "type": "object",
            "properties": {
                "cursor": { "type": "string", "description": "Cursor for pagination" },
                "direction": {
                    "type": "string",
                    "enum": ["asc", "desc"],
                    "description": "Direction to order buckets"
                },
                "name_contains": {
                    "type": "string",
                    "description": "Filter by bucket name containing this string"
                },
                "per_page": { "type": "number", "description": "Number of buckets per page" },
                "start_after": {
                    "type": "string",
                    "description": "Start listing after this bucket name"
                }
            }
        }),
        move |args: Value| {
            let ctx = ctx.clone();
            async move {
                let account_id = match require_account(&ctx, "listing R2 buckets").await {
                    Ok(id) => id,
                    Err(result) => return result,
                };
                let params: R2BucketListParams = match serde_json::from_value(args) {
                    Ok(params) => params,
                    Err(e) => return ToolResult::error(e, "listing R2 buckets"),
                };

                match ctx.client().list_r2_buckets(&account_id, &params).await {
                    Ok(list) => ToolResult::json(&json!({
                        "buckets": list.buckets,
                        "count": list.buckets.len(),
                    })),
                    Err(e) => ToolResult::error(e, "listing R2 buckets"),
                }
            }
        },
    );

    let ctx = context.clone();
    server.tool(
        "r2_bucket_create",
        "Create a new R2 bucket in your Cloudflare account",
        json!({
            "type": "object",
            "properties": { "name": bucket_name_schema() },
            "required": ["name"]
        }),
        move |args: Value| {
            let ctx = ctx.clone();
            async move {
                let account_id = match require_account(&ctx, "creating R2 bucket").await {
                    Ok(id) => id,
                    Err(result) => return result,
                };
                let name = match args.get("name").and_then(|v| v.as_str()) {
                    Some(name) => name.to_string(),
                    None => return ToolResult::error("name is required", "creating R2 bucket"),
                };

                match ctx.client().create_r2_bucket(&account_id, &name).await {
                    Ok(bucket) => ToolResult::json(&bucket),
                    Err(e) => ToolResult::error(e, "creating R2 bucket"),
                }
            }
        },
    );

    let ctx = context.clone();
    server.tool(
        "r2_bucket_get",
        "Get details about a specific R2 bucket",
        json!({
            "type": "object",
            "properties": { "name": bucket_name_schema() },
            "required": ["name"]
        }),
        move |args: Value| {
            let ctx = ctx.clone();
            async move {
                let account_id = match require_account(&ctx, "getting R2 bucket").await {
                    Ok(id) => id,
                    Err(result) => return result,
                };
                let name = match args.get("name").and_then(|v| v.as_str()) {
                    Some(name) => name.to_string(),
                    None => return ToolResult::error("name is required", "getting R2 bucket"),
                };

                match ctx.client().get_r2_bucket(&account_id, &name).await {
                    Ok(bucket) => ToolResult::json(&bucket),
                    Err(e) => ToolResult::error(e, "getting R2 bucket"),
                }
            }
        },
    );

    let ctx = context.clone();
    server.tool(
        "r2_bucket_delete",
        "Delete an R2 bucket",
        json!({
            "type": "object",
            "properties": { "name": bucket_name_schema() },
            "required": ["name"]
        }),
        move |args: Value| {
            let ctx = ctx.clone();
            async move {
                let account_id = match require_account(&ctx, "deleting R2 bucket").await {
                    Ok(id) => id,
                    Err(result) => return result,
                };
                let name = match args.get("name").and_then(|v| v.as_str()) {
                    Some(name) => name.to_string(),
                    None => return ToolResult::error("name is required", "deleting R2 bucket"),
                };

                match ctx.client().delete_r2_bucket(&account_id, &name).await {
                    Ok(result) => ToolResult::json(&result),
                    Err(e) => ToolResult::error(e, "deleting R2 bucket"),
                }
            }
        },
    );
}
