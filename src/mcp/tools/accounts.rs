use serde_json::{json, Value};
use std::sync::Arc;

use crate::mcp::context::PluginContext;
use crate::mcp::server::McpServer;

use super::result::ToolResult;

/// Registers account management tools
pub fn register_account_tools(server: &McpServer, context: &Arc<PluginContext>) {
    let ctx = context.clone();
    server.tool(
        "accounts_list",
        "List all accounts in your Cloudflare account",
        json!({ "type": "object", "properties": {} }),
        move |_args: Value| {
            let ctx = ctx.clone();
            async move {
                match ctx.accounts().await {
                    Ok(accounts) => ToolResult::json(&json!({
                        "accounts": accounts.as_slice(),
                        "count": accounts.len(),
                    })),
                    Err(e) => ToolResult::error(e, "listing accounts"),
                }
            }
        },
    );

    let ctx = context.clone();
    server.tool(
        "set_active_account",
        "Set active account to be used for tool calls that require accountId",
        json!({
            "type": "object",
            "properties": {
                "accountId": {
                    "type": "string",
                    "description": "The accountId present in the users Cloudflare account, that should be the active accountId."
                }
            },
            "required": ["accountId"]
        }),
        move |args: Value| {
            let ctx = ctx.clone();
            async move {
                let account_id = match args.get("accountId").and_then(|v| v.as_str()) {
                    Some(id) => id.to_string(),
                    None => {
                        return ToolResult::error(
                            "accountId is required",
                            "setting active account",
                        )
                    }
                };

                ctx.set_account_id(account_id.clone());
                ToolResult::json(&json!({ "activeAccountId": account_id }))
            }
        },
    );

    let ctx = context.clone();
    server.tool(
        "get_active_account",
        "Get the currently active account ID being used for API calls",
        json!({ "type": "object", "properties": {} }),
        move |_args: Value| {
            let ctx = ctx.clone();
            async move {
                match ctx.account_id().await {
                    Ok(account_id) => {
                        let is_set = account_id.is_some();
                        ToolResult::json(&json!({
                            "activeAccountId": account_id,
                            "isSet": is_set,
                        }))
                    }
                    Err(e) => ToolResult::error(e, "getting active account"),
                }
            }
        },
    );
}
