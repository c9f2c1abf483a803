//! Category-driven tool registration and end-to-end tool call behavior.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use mcp_cloudflare::{
    register_tools, Account, AccountsProvider, McpResult, McpServer, PluginConfig, PluginContext,
    RegisterOptions, ToolCategory, MISSING_ACCOUNT_ID_TEXT,
};

struct StaticAccounts {
    accounts: Vec<Account>,
}

#[async_trait]
impl AccountsProvider for StaticAccounts {
    async fn list_accounts(&self) -> McpResult<Vec<Account>> {
        Ok(self.accounts.clone())
    }
}

fn config() -> PluginConfig {
    PluginConfig {
        api_token: "test-token".to_string(),
        account_id: None,
        enabled_categories: None,
        disabled_categories: Vec::new(),
    }
}

fn context_with_accounts(pairs: &[(&str, &str)]) -> Arc<PluginContext> {
    let provider = Arc::new(StaticAccounts {
        accounts: pairs
            .iter()
            .map(|(id, name)| Account {
                id: id.to_string(),
                name: name.to_string(),
            })
            .collect(),
    });
    Arc::new(PluginContext::with_provider(&config(), provider).unwrap())
}

fn server_with(options: &RegisterOptions) -> McpServer {
    let server = McpServer::new("test-server", "0.0.1");
    let context = context_with_accounts(&[]);
    register_tools(&server, &context, options);
    server
}

#[test]
fn test_default_categories_register_all_default_tools() {
    let server = server_with(&RegisterOptions::default());

    let names: Vec<String> = server.list_tools().into_iter().map(|t| t.name).collect();
    assert_eq!(server.tool_count(), 23);
    for expected in [
        "accounts_list",
        "set_active_account",
        "get_active_account",
        "workers_list",
        "kv_namespaces_list",
        "r2_buckets_list",
        "d1_databases_list",
        "zones_list",
        "zone_dns_records_list",
    ] {
        assert!(names.contains(&expected.to_string()), "missing {}", expected);
    }
    // Registration follows the default category order.
    assert_eq!(names[0], "accounts_list");
}

#[test]
fn test_explicitly_empty_enabled_set_registers_nothing() {
    let server = server_with(&RegisterOptions {
        enabled_categories: Some(Vec::new()),
        disabled_categories: Vec::new(),
    });
    assert_eq!(server.tool_count(), 0);
}

#[test]
fn test_disabled_categories_are_subtracted() {
    let server = server_with(&RegisterOptions {
        enabled_categories: Some(vec![ToolCategory::Kv, ToolCategory::R2]),
        disabled_categories: vec![ToolCategory::R2],
    });

    let names: Vec<String> = server.list_tools().into_iter().map(|t| t.name).collect();
    assert_eq!(names.len(), 5);
    assert!(names.iter().all(|name| name.starts_with("kv_")));
}

#[test]
fn test_reserved_categories_register_no_tools() {
    let server = server_with(&RegisterOptions {
        enabled_categories: Some(vec![ToolCategory::Hyperdrive, ToolCategory::Radar]),
        disabled_categories: Vec::new(),
    });
    assert_eq!(server.tool_count(), 0);
}

#[tokio::test]
async fn test_set_and_get_active_account_tools() {
    let server = McpServer::new("test-server", "0.0.1");
    let context = context_with_accounts(&[("acc-1", "First"), ("acc-2", "Second")]);
    register_tools(
        &server,
        &context,
        &RegisterOptions {
            enabled_categories: Some(vec![ToolCategory::Accounts]),
            disabled_categories: Vec::new(),
        },
    );

    let result = server
        .call_tool("set_active_account", json!({ "accountId": "acc-2" }))
        .await
        .unwrap();
    assert_eq!(
        result.first_json().unwrap(),
        json!({ "activeAccountId": "acc-2" })
    );

    let result = server
        .call_tool("get_active_account", json!({}))
        .await
        .unwrap();
    assert_eq!(
        result.first_json().unwrap(),
        json!({ "activeAccountId": "acc-2", "isSet": true })
    );
}

#[tokio::test]
async fn test_accounts_list_tool_reports_sorted_accounts() {
    let server = McpServer::new("test-server", "0.0.1");
    let context = context_with_accounts(&[("acc-2", "Zeta"), ("acc-1", "Alpha")]);
    register_tools(
        &server,
        &context,
        &RegisterOptions {
            enabled_categories: Some(vec![ToolCategory::Accounts]),
            disabled_categories: Vec::new(),
        },
    );

    let result = server.call_tool("accounts_list", json!({})).await.unwrap();
    let payload = result.first_json().unwrap();

    assert_eq!(payload["count"], json!(2));
    assert_eq!(payload["accounts"][0]["name"], json!("Alpha"));
    assert_eq!(payload["accounts"][1]["name"], json!("Zeta"));
}

#[tokio::test]
async fn test_unresolved_account_yields_sentinel() {
    let server = McpServer::new("test-server", "0.0.1");
    // Two accounts and no explicit id: resolution is ambiguous.
    let context = context_with_accounts(&[("acc-1", "First"), ("acc-2", "Second")]);
    register_tools(
        &server,
        &context,
        &RegisterOptions {
            enabled_categories: Some(vec![ToolCategory::Kv]),
            disabled_categories: Vec::new(),
        },
    );

    let result = server
        .call_tool("kv_namespaces_list", json!({}))
        .await
        .unwrap();
    assert_eq!(result.first_text(), Some(MISSING_ACCOUNT_ID_TEXT));
}

#[tokio::test]
async fn test_get_active_account_with_no_accounts() {
    let server = McpServer::new("test-server", "0.0.1");
    let context = context_with_accounts(&[]);
    register_tools(
        &server,
        &context,
        &RegisterOptions {
            enabled_categories: Some(vec![ToolCategory::Accounts]),
            disabled_categories: Vec::new(),
        },
    );

    let result = server
        .call_tool("get_active_account", json!({}))
        .await
        .unwrap();
    assert_eq!(
        result.first_json().unwrap(),
        json!({ "activeAccountId": null, "isSet": false })
    );
}
