use serde_json::{json, Value};
use std::sync::Arc;

use crate::cloudflare::D1DatabaseListParams;
use crate::mcp::context::PluginContext;
use crate::mcp::server::McpServer;

use super::require_account;
use super::result::ToolResult;

fn database_id_schema() -> Value {
    json!({ "type": "string", "description": "The ID of the D1 database" })
}

fn database_name_schema() -> Value {
    json!({ "type": "string", "description": "The name of the D1 database" })
}

/// Registers D1 database management tools
pub fn register_d1_tools(server: &McpServer, context: &Arc<PluginContext>) {
    let ctx = context.clone();
    server.tool(
        "d1_databases_list",
        "List all of the D1 databases in your Cloudflare account",
        json!({
            "type": "object",
            "properties": {
                "name": { "type": "string", "description": "Filter by database name" },
                "page": { "type": "number", "description": "Page number" },
                "per_page": { "type": "number", "description": "Number of results per page" }
            }
        }),
        move |args: Value| {
            let ctx = ctx.clone();
            async move {
                let account_id = match require_account(&ctx, "listing D1 databases").await {
                    Ok(id) => id,
                    Err(result) => return result,
                };
                let params: D1DatabaseListParams = match serde_json::from_value(args) {
                    Ok(params) => params,
                    Err(e) => return ToolResult::error(e, "listing D1 databases"),
                };

                match ctx.client().list_d1_databases(&account_id, &params).await {
                    Ok((databases, result_info)) => ToolResult::json(&json!({
                        "result": databases,
                        "result_info": result_info,
                    })),
                    Err(e) => ToolResult::error(e, "listing D1 databases"),
                }
            }
        },
    );

    let ctx = context.clone();
    server.tool(
        "d1_database_create",
        "Create a new D1 database in your Cloudflare account",
        json!({
            "type": "object",
            "properties": {
                "name": database_name_schema(),
                "primary_location_hint": {
                    "type": "string",
                    "enum": ["wnam", "enam", "weur", "eeur", "apac", "oc"],
                    "description": "Primary location hint for the database (wnam, enam, weur, eeur, apac, oc)"
                }
            },
            "required": ["name"]
        }),
        move |args: Value| {
            let ctx = ctx.clone();
            async move {
                let account_id = match require_account(&ctx, "creating D1 database").await {
                    Ok(id) => id,
                    Err(result) => return result,
                };
                let name = match args.get("name").and_then(|v| v.as_str()) {
                    Some(name) => name.to_string(),
                    None => return ToolResult::error("name is required", "creating D1 database"),
                };
                let hint = args
                    .get("primary_location_hint")
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string());

                match ctx
                    .client()
                    .create_d1_database(&account_id, &name, hint.as_deref())
                    .await
                {
                    Ok(database) => ToolResult::json(&database),
                    Err(e) => ToolResult::error(e, "creating D1 database"),
                }
            }
        },
    );

    let ctx = context.clone();
    server.tool(
        "d1_database_delete",
        "Delete a D1 database in your Cloudflare account",
        json!({
            "type": "object",
            "properties": { "database_id": database_id_schema() },
            "required": ["database_id"]
        }),
        move |args: Value| {
            let ctx = ctx.clone();
            async move {
                let account_id = match require_account(&ctx, "deleting D1 database").await {
                    Ok(id) => id,
                    Err(result) => return result,
                };
                let database_id = match args.get("database_id").and_then(|v| v.as_str()) {
                    Some(id) => id.to_string(),
                    None => {
                        return ToolResult::error("database_id is required", "deleting D1 database")
                    }
                };

                match ctx
                    .client()
                    .delete_d1_database(&account_id, &database_id)
                    .await
                {
                    Ok(result) => ToolResult::json(&result),
                    Err(e) => ToolResult::error(e, "deleting D1 database"),
                }
            }
        },
    );

    let ctx = context.clone();
    server.tool(
        "d1_database_get",
        "Get a D1 database in your Cloudflare account",
        json!({
            "type": "object",
            "properties": { "database_id": database_id_schema() },
            "required": ["database_id"]
        }),
        move |args: Value| {
            let ctx = ctx.clone();
            async move {
                let account_id = match require_account(&ctx, "getting D1 database").await {
                    Ok(id) => id,
                    Err(result) => return result,
                };
                let database_id = match args.get("database_id").and_then(|v| v.as_str()) {
                    Some(id) => id.to_string(),
                    None => {
                        return ToolResult::error("database_id is required", "getting D1 database")
                    }
                };

                match ctx
                    .client()
                    .get_d1_database(&account_id, &database_id)
                    .await
                {
                    Ok(database) => ToolResult::json(&database),
                    Err(e) => ToolResult::error(e, "getting D1 database"),
                }
            }
        },
    );

    let ctx = context.clone();
    server.tool(
        "d1_database_query",
        "Query a D1 database in your Cloudflare account",
        json!({
            "type": "object",
            "properties": {
                "database_id": database_id_schema(),
                "sql": { "type": "string", "description": "The SQL query to execute" },
                "params": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Query parameters for parameterized queries (as strings)"
                }
            },
            "required": ["database_id", "sql"]
        }),
        move |args: Value| {
            let ctx = ctx.clone();
            async move {
                let account_id = match require_account(&ctx, "querying D1 database").await {
                    Ok(id) => id,
                    Err(result) => return result,
                };
                let database_id = match args.get("database_id").and_then(|v| v.as_str()) {
                    Some(id) => id.to_string(),
                    None => {
                        return ToolResult::error("database_id is required", "querying D1 database")
                    }
                };
                let sql = match args.get("sql").and_then(|v| v.as_str()) {
                    Some(sql) => sql.to_string(),
                    None => return ToolResult::error("sql is required", "querying D1 database"),
                };
                let params: Vec<String> = match args.get("params") {
                    Some(value) => match serde_json::from_value(value.clone()) {
                        Ok(params) => params,
                        Err(e) => return ToolResult::error(e, "querying D1 database"),
                    },
                    None => Vec::new(),
                };

                match ctx
                    .client()
                    .query_d1_database(&account_id, &database_id, &sql, &params)
                    .await
                {
                    Ok(results) => ToolResult::json(&results),
                    Err(e) => ToolResult::error(e, "querying D1 database"),
                }
            }
        },
    );
}
