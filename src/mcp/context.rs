//! Shared plugin context: the single source of truth for which account a
//! tool call acts on.
//!
//! One `PluginContext` is constructed at startup and shared by reference
//! across every registered tool handler. It owns the only mutable state in
//! the crate: the active account id and the memoized account list. The
//! account list is fetched at most once per process; remote changes after
//! that are not observed. This staleness is deliberate and trades freshness
//! for fewer API calls.

use async_trait::async_trait;
use std::fmt;
use std::sync::{Arc, RwLock};
use tracing::debug;

use crate::cloudflare::{Account, CloudflareClient};
use crate::config::PluginConfig;
use crate::utils::error::McpResult;

/// Seam for enumerating accounts, so the resolver can be exercised with an
/// in-memory provider in tests. The production implementation walks every
/// page of the accounts endpoint.
#[async_trait]
pub trait AccountsProvider: Send + Sync {
    /// Returns the complete account list visible to the credential
    async fn list_accounts(&self) -> McpResult<Vec<Account>>;
}

#[async_trait]
impl AccountsProvider for CloudflareClient {
    async fn list_accounts(&self) -> McpResult<Vec<Account>> {
        CloudflareClient::list_accounts(self).await
    }
}

/// Context object shared by all tool handlers
pub struct PluginContext {
    /// Cloudflare API client
    client: CloudflareClient,

    /// Account enumeration seam, the client itself in production
    accounts_api: Arc<dyn AccountsProvider>,

    /// Currently active account id, if any
    active_account_id: RwLock<Option<String>>,

    /// Memoized account list; populated once, never refreshed
    cached_accounts: RwLock<Option<Arc<Vec<Account>>>>,
}

impl fmt::Debug for PluginContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginContext")
            .field("active_account_id", &self.active_account_id)
            .finish_non_exhaustive()
    }
}

impl PluginContext {
    /// Creates a context from configuration, optionally seeding the active
    /// account id
    pub fn new(config: &PluginConfig) -> McpResult<Self> {
        let client = CloudflareClient::new(&config.api_token)?;
        let accounts_api: Arc<dyn AccountsProvider> = Arc::new(client.clone());
        Ok(Self::build(client, config, accounts_api))
    }

    /// Creates a context with a custom accounts provider (used in tests)
    pub fn with_provider(
        config: &PluginConfig,
        accounts_api: Arc<dyn AccountsProvider>,
    ) -> McpResult<Self> {
        let client = CloudflareClient::new(&config.api_token)?;
        Ok(Self::build(client, config, accounts_api))
    }

    fn build(
        client: CloudflareClient,
        config: &PluginConfig,
        accounts_api: Arc<dyn AccountsProvider>,
    ) -> Self {
        Self {
            client,
            accounts_api,
            active_account_id: RwLock::new(config.account_id.clone()),
            cached_accounts: RwLock::new(None),
        }
    }

    /// Returns the Cloudflare API client
    pub fn client(&self) -> &CloudflareClient {
        &self.client
    }

    /// Resolves the account id for the current call.
    ///
    /// An explicitly set id always wins and involves no I/O. Otherwise the
    /// full account list is consulted; a sole account is adopted as the
    /// active one. Zero or multiple candidates resolve to `None`, which
    /// callers must answer with the missing-account sentinel rather than an
    /// error. Auto-selection never picks among multiple accounts.
    pub async fn account_id(&self) -> McpResult<Option<String>> {
        if let Some(id) = self.active_id() {
            return Ok(Some(id));
        }

        let accounts = self.accounts().await?;
        if accounts.len() == 1 {
            let id = accounts[0].id.clone();
            self.set_account_id(id.clone());
            debug!(account_id = %id, "auto-selected sole account");
            return Ok(Some(id));
        }

        Ok(None)
    }

    /// Sets the active account id, overwriting any previous value.
    ///
    /// The id is not validated against the account list; a bad id fails at
    /// the first API call that uses it.
    pub fn set_account_id(&self, account_id: impl Into<String>) {
        let mut active = self
            .active_account_id
            .write()
            .unwrap_or_else(|e| e.into_inner());
        *active = Some(account_id.into());
    }

    /// Returns the account list, sorted by name, fetching it on first use.
    ///
    /// The list is memoized for the process lifetime; subsequent calls
    /// return the same `Arc` without touching the network. Concurrent first
    /// calls may each fetch independently (no single-flight); both arrive at
    /// the same sorted content and the last write wins.
    pub async fn accounts(&self) -> McpResult<Arc<Vec<Account>>> {
        if let Some(cached) = self.cached() {
            return Ok(cached);
        }

        let mut accounts = self.accounts_api.list_accounts().await?;
        accounts.sort_by(|a, b| a.name.cmp(&b.name));
        let accounts = Arc::new(accounts);

        let mut cache = self
            .cached_accounts
            .write()
            .unwrap_or_else(|e| e.into_inner());
        *cache = Some(accounts.clone());

        Ok(accounts)
    }

    fn active_id(&self) -> Option<String> {
        self.active_account_id
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn cached(&self) -> Option<Arc<Vec<Account>>> {
        self.cached_accounts
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_does_not_leak_token() {
        let config = PluginConfig {
            api_token: "super-secret".to_string(),
            account_id: None,
            enabled_categories: None,
            disabled_categories: Vec::new(),
        };
        let context = PluginContext::new(&config).unwrap();

        let rendered = format!("{:?}", context);
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn test_set_account_id_overwrites() {
        let config = PluginConfig {
            api_token: "token".to_string(),
            account_id: Some("seed".to_string()),
            enabled_categories: None,
            disabled_categories: Vec::new(),
        };
        let context = PluginContext::new(&config).unwrap();

        assert_eq!(context.active_id(), Some("seed".to_string()));
        context.set_account_id("other");
        assert_eq!(context.active_id(), Some("other".to_string()));
    }
}
