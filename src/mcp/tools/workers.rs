use serde_json::{json, Value};
use std::cmp::Ordering;
use std::sync::Arc;

use crate::mcp::context::PluginContext;
use crate::mcp::server::McpServer;

use super::require_account;
use super::result::ToolResult;

fn script_name_schema() -> Value {
    json!({ "type": "string", "description": "The name of the worker script" })
}

/// Registers Workers management tools
pub fn register_workers_tools(server: &McpServer, context: &Arc<PluginContext>) {
    let ctx = context.clone();
    server.tool(
        "workers_list",
        "List all Workers in your Cloudflare account.\nIf you only need details of a single Worker, use workers_get_worker.",
        json!({ "type": "object", "properties": {} }),
        move |_args: Value| {
            let ctx = ctx.clone();
            async move {
                let account_id = match require_account(&ctx, "listing workers").await {
                    Ok(id) => id,
                    Err(result) => return result,
                };

                match ctx.client().list_worker_scripts(&account_id).await {
                    Ok(mut scripts) => {
                        // Newest first; scripts without a creation date sort last.
                        // ISO 8601 timestamps order correctly as strings.
                        scripts.sort_by(|a, b| match (&a.created_on, &b.created_on) {
                            (None, None) => Ordering::Equal,
                            (None, Some(_)) => Ordering::Greater,
                            (Some(_), None) => Ordering::Less,
                            (Some(a), Some(b)) => b.cmp(a),
                        });

                        let workers: Vec<Value> = scripts
                            .iter()
                            .map(|script| {
                                json!({
                                    "name": script.id,
                                    "modified_on": script.modified_on,
                                    "created_on": script.created_on,
                                })
                            })
                            .collect();

                        ToolResult::json(&json!({
                            "workers": workers,
                            "count": workers.len(),
                        }))
                    }
                    Err(e) => ToolResult::error(e, "listing workers"),
                }
            }
        },
    );

    let ctx = context.clone();
    server.tool(
        "workers_get_worker_code",
        "Get the source code of a Cloudflare Worker. Note: This may be a bundled version of the worker.",
        json!({
            "type": "object",
            "properties": { "scriptName": script_name_schema() },
            "required": ["scriptName"]
        }),
        move |args: Value| {
            let ctx = ctx.clone();
            async move {
                let account_id = match require_account(&ctx, "retrieving worker script").await {
                    Ok(id) => id,
                    Err(result) => return result,
                };
                let script_name = match args.get("scriptName").and_then(|v| v.as_str()) {
                    Some(name) => name.to_string(),
                    None => {
                        return ToolResult::error(
                            "scriptName is required",
                            "retrieving worker script",
                        )
                    }
                };

                match ctx
                    .client()
                    .get_worker_script(&account_id, &script_name)
                    .await
                {
                    Ok(code) => ToolResult::json(&json!({ "code": code })),
                    Err(e) => ToolResult::error(e, "retrieving worker script"),
                }
            }
        },
    );

    let ctx = context.clone();
    server.tool(
        "workers_delete",
        "Delete a Worker script from your Cloudflare account",
        json!({
            "type": "object",
            "properties": { "scriptName": script_name_schema() },
            "required": ["scriptName"]
        }),
        move |args: Value| {
            let ctx = ctx.clone();
            async move {
                let account_id = match require_account(&ctx, "deleting worker").await {
                    Ok(id) => id,
                    Err(result) => return result,
                };
                let script_name = match args.get("scriptName").and_then(|v| v.as_str()) {
                    Some(name) => name.to_string(),
                    None => return ToolResult::error("scriptName is required", "deleting worker"),
                };

                match ctx
                    .client()
                    .delete_worker_script(&account_id, &script_name)
                    .await
                {
                    Ok(()) => ToolResult::json(&json!({ "success": true, "deleted": script_name })),
                    Err(e) => ToolResult::error(e, "deleting worker"),
                }
            }
        },
    );
}
