use serde_json::{json, Value};
use std::sync::Arc;

use crate::cloudflare::KvNamespaceListParams;
use crate::mcp::context::PluginContext;
use crate::mcp::server::McpServer;

use super::require_account;
use super::result::ToolResult;

fn namespace_id_schema() -> Value {
    json!({ "type": "string", "description": "The ID of the KV namespace" })
}

fn namespace_title_schema() -> Value {
    json!({ "type": "string", "description": "The human-readable name/title of the KV namespace" })
}

/// Registers KV namespace management tools
pub fn register_kv_tools(server: &McpServer, context: &Arc<PluginContext>) {
    let ctx = context.clone();
    server.tool(
        "kv_namespaces_list",
        "List all of the KV namespaces in your Cloudflare account.\nReturns a list of KV namespaces with id and title properties.",
        json!({
            "type": "object",
            "properties": {
                "params": {
                    "type": "object",
                    "properties": {
                        "direction": {
                            "type": "string",
                            "enum": ["asc", "desc"],
                            "description": "Direction to order namespaces (asc/desc)"
                        },
                        "order": {
                            "type": "string",
                            "enum": ["id", "title"],
                            "description": "Field to order namespaces by (id/title)"
                        },
                        "page": {
                            "type": "integer",
                            "minimum": 1,
                            "description": "Page number of results (starts at 1)"
                        },
                        "per_page": {
                            "type": "integer",
                            "minimum": 1,
                            "maximum": 100,
                            "description": "Number of namespaces per page (1-100)"
                        }
                    }
                }
            }
        }),
        move |args: Value| {
            let ctx = ctx.clone();
            async move {
                let account_id = match require_account(&ctx, "listing KV namespaces").await {
                    Ok(id) => id,
                    Err(result) => return result,
                };
                let params: KvNamespaceListParams = match args.get("params") {
                    Some(value) => match serde_json::from_value(value.clone()) {
                        Ok(params) => params,
                        Err(e) => return ToolResult::error(e, "listing KV namespaces"),
                    },
                    None => KvNamespaceListParams::default(),
                };

                match ctx.client().list_kv_namespaces(&account_id, &params).await {
                    Ok(namespaces) => {
                        let namespaces: Vec<Value> = namespaces
                            .iter()
                            .map(|ns| json!({ "id": ns.id, "title": ns.title }))
                            .collect();
                        ToolResult::json(&json!({
                            "namespaces": namespaces,
                            "count": namespaces.len(),
                        }))
                    }
                    Err(e) => ToolResult::error(e, "listing KV namespaces"),
                }
            }
        },
    );

    let ctx = context.clone();
    server.tool(
        "kv_namespace_create",
        "Create a new KV namespace in your Cloudflare account",
        json!({
            "type": "object",
            "properties": { "title": namespace_title_schema() },
            "required": ["title"]
        }),
        move |args: Value| {
            let ctx = ctx.clone();
            async move {
                let account_id = match require_account(&ctx, "creating KV namespace").await {
                    Ok(id) => id,
                    Err(result) => return result,
                };
                let title = match args.get("title").and_then(|v| v.as_str()) {
                    Some(title) => title.to_string(),
                    None => return ToolResult::error("title is required", "creating KV namespace"),
                };

                match ctx.client().create_kv_namespace(&account_id, &title).await {
                    Ok(namespace) => ToolResult::json(&namespace),
                    Err(e) => ToolResult::error(e, "creating KV namespace"),
                }
            }
        },
    );

    let ctx = context.clone();
    server.tool(
        "kv_namespace_delete",
        "Delete a KV namespace in your Cloudflare account",
        json!({
            "type": "object",
            "properties": { "namespace_id": namespace_id_schema() },
            "required": ["namespace_id"]
        }),
        move |args: Value| {
            let ctx = ctx.clone();
            async move {
                let account_id = match require_account(&ctx, "deleting KV namespace").await {
                    Ok(id) => id,
                    Err(result) => return result,
                };
                let namespace_id = match args.get("namespace_id").and_then(|v| v.as_str()) {
                    Some(id) => id.to_string(),
                    None => {
                        return ToolResult::error(
                            "namespace_id is required",
                            "deleting KV namespace",
                        )
                    }
                };

                match ctx
                    .client()
                    .delete_kv_namespace(&account_id, &namespace_id)
                    .await
                {
                    Ok(Value::Null) => ToolResult::json(&json!({ "success": true })),
                    Ok(result) => ToolResult::json(&result),
                    Err(e) => ToolResult::error(e, "deleting KV namespace"),
                }
            }
        },
    );

    let ctx = context.clone();
    server.tool(
        "kv_namespace_get",
        "Get details of a KV namespace in your Cloudflare account.\nReturns id, title, supports_url_encoding, and beta properties.",
        json!({
            "type": "object",
            "properties": { "namespace_id": namespace_id_schema() },
            "required": ["namespace_id"]
        }),
        move |args: Value| {
            let ctx = ctx.clone();
            async move {
                let account_id = match require_account(&ctx, "getting KV namespace").await {
                    Ok(id) => id,
                    Err(result) => return result,
                };
                let namespace_id = match args.get("namespace_id").and_then(|v| v.as_str()) {
                    Some(id) => id.to_string(),
                    None => {
                        return ToolResult::error(
                            "namespace_id is required",
                            "getting KV namespace",
                        )
                    }
                };

                match ctx
                    .client()
                    .get_kv_namespace(&account_id, &namespace_id)
                    .await
                {
                    Ok(namespace) => ToolResult::json(&namespace),
                    Err(e) => ToolResult::error(e, "getting KV namespace"),
                }
            }
        },
    );

    let ctx = context.clone();
    server.tool(
        "kv_namespace_update",
        "Update the title of a KV namespace in your Cloudflare account",
        json!({
            "type": "object",
            "properties": {
                "namespace_id": namespace_id_schema(),
                "title": namespace_title_schema()
            },
            "required": ["namespace_id", "title"]
        }),
        move |args: Value| {
            let ctx = ctx.clone();
            async move {
                let account_id = match require_account(&ctx, "updating KV namespace").await {
                    Ok(id) => id,
                    Err(result) => return result,
                };
                let namespace_id = match args.get("namespace_id").and_then(|v| v.as_str()) {
                    Some(id) => id.to_string(),
                    None => {
                        return ToolResult::error(
                            "namespace_id is required",
                            "updating KV namespace",
                        )
                    }
                };
                let title = match args.get("title").and_then(|v| v.as_str()) {
                    Some(title) => title.to_string(),
                    None => return ToolResult::error("title is required", "updating KV namespace"),
                };

                match ctx
                    .client()
                    .update_kv_namespace(&account_id, &namespace_id, &title)
                    .await
                {
                    Ok(Value::Null) => ToolResult::json(&json!({ "success": true })),
                    Ok(result) => ToolResult::json(&result),
                    Err(e) => ToolResult::error(e, "updating KV namespace"),
                }
            }
        },
    );
}
