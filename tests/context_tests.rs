//! Account resolution behavior of the shared plugin context.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio_test::{assert_err, assert_ok};

use mcp_cloudflare::{Account, AccountsProvider, McpError, McpResult, PluginConfig, PluginContext};

/// In-memory accounts provider that counts enumerations
struct StaticAccounts {
    accounts: Vec<Account>,
    calls: AtomicUsize,
}

impl StaticAccounts {
    fn new(pairs: &[(&str, &str)]) -> Arc<Self> {
        Arc::new(Self {
            accounts: pairs
                .iter()
                .map(|(id, name)| Account {
                    id: id.to_string(),
                    name: name.to_string(),
                })
                .collect(),
            calls: AtomicUsize::new(0),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AccountsProvider for StaticAccounts {
    async fn list_accounts(&self) -> McpResult<Vec<Account>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.accounts.clone())
    }
}

/// Provider that always fails, standing in for a transport error
struct FailingAccounts;

#[async_trait]
impl AccountsProvider for FailingAccounts {
    async fn list_accounts(&self) -> McpResult<Vec<Account>> {
        Err(McpError::Api("connection reset".to_string()))
    }
}

fn config(account_id: Option<&str>) -> PluginConfig {
    PluginConfig {
        api_token: "test-token".to_string(),
        account_id: account_id.map(|s| s.to_string()),
        enabled_categories: None,
        disabled_categories: Vec::new(),
    }
}

fn context_with(provider: Arc<dyn AccountsProvider>, account_id: Option<&str>) -> PluginContext {
    PluginContext::with_provider(&config(account_id), provider).unwrap()
}

#[tokio::test]
async fn test_no_accounts_resolves_to_none() {
    let provider = StaticAccounts::new(&[]);
    let context = context_with(provider.clone(), None);

    assert_eq!(assert_ok!(context.account_id().await), None);
}

#[tokio::test]
async fn test_sole_account_is_auto_selected_once() {
    let provider = StaticAccounts::new(&[("acc-1", "Only Account")]);
    let context = context_with(provider.clone(), None);

    assert_eq!(
        context.account_id().await.unwrap(),
        Some("acc-1".to_string())
    );
    // Second resolution uses the adopted id, no further provider calls.
    assert_eq!(
        context.account_id().await.unwrap(),
        Some("acc-1".to_string())
    );
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_multiple_accounts_never_auto_select() {
    let provider = StaticAccounts::new(&[("acc-1", "First"), ("acc-2", "Second")]);
    let context = context_with(provider.clone(), None);

    assert_eq!(context.account_id().await.unwrap(), None);
    assert_eq!(context.account_id().await.unwrap(), None);
    // The list is cached after the first resolution attempt.
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_explicit_account_id_always_wins() {
    let provider = StaticAccounts::new(&[("acc-1", "First"), ("acc-2", "Second")]);
    let context = context_with(provider.clone(), None);

    context.set_account_id("acc-override");
    assert_eq!(
        context.account_id().await.unwrap(),
        Some("acc-override".to_string())
    );
    // Explicit id short-circuits resolution entirely.
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_configured_account_id_seeds_active_state() {
    let provider = StaticAccounts::new(&[("acc-1", "First"), ("acc-2", "Second")]);
    let context = context_with(provider.clone(), Some("acc-configured"));

    assert_eq!(
        context.account_id().await.unwrap(),
        Some("acc-configured".to_string())
    );
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_accounts_are_memoized() {
    let provider = StaticAccounts::new(&[("acc-1", "First"), ("acc-2", "Second")]);
    let context = context_with(provider.clone(), None);

    let first = context.accounts().await.unwrap();
    let second = context.accounts().await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_accounts_sorted_by_name_case_sensitive() {
    let provider = StaticAccounts::new(&[
        ("acc-b", "beta"),
        ("acc-a", "alpha"),
        ("acc-c", "Alpha"),
    ]);
    let context = context_with(provider, None);

    let accounts = context.accounts().await.unwrap();
    let names: Vec<&str> = accounts.iter().map(|a| a.name.as_str()).collect();

    // Uppercase sorts before lowercase in a byte-wise comparison.
    assert_eq!(names, vec!["Alpha", "alpha", "beta"]);
}

#[tokio::test]
async fn test_provider_errors_propagate_unhandled() {
    let context = context_with(Arc::new(FailingAccounts), None);

    assert_err!(context.account_id().await);
    assert_err!(context.accounts().await);

    // A failed fetch is not cached; recovery on a later call is possible.
    assert_err!(context.accounts().await);
}

#[tokio::test]
async fn test_independent_contexts_do_not_share_state() {
    let provider_a = StaticAccounts::new(&[("acc-1", "Only")]);
    let provider_b = StaticAccounts::new(&[]);
    let context_a = context_with(provider_a, None);
    let context_b = context_with(provider_b, None);

    context_a.set_account_id("acc-x");
    assert_eq!(
        context_a.account_id().await.unwrap(),
        Some("acc-x".to_string())
    );
    assert_eq!(context_b.account_id().await.unwrap(), None);
}
