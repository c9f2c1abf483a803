use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

use crate::utils::error::{McpError, McpResult};

use super::types::{
    Account, ApiEnvelope, ApiErrorDetail, D1Database, D1DatabaseListParams, D1QueryResult,
    DnsRecord, DnsRecordListParams, KvNamespace, KvNamespaceListParams, R2Bucket, R2BucketList,
    R2BucketListParams, ResultInfo, WorkerScript, Zone, ZoneListParams,
};

/// Base URL of the Cloudflare v4 API
pub const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Page size used when enumerating accounts
const ACCOUNTS_PER_PAGE: u32 = 50;

/// Client for the Cloudflare v4 API
#[derive(Debug, Clone)]
pub struct CloudflareClient {
    /// HTTP client for making requests
    http: Client,

    /// Base URL for all API requests
    base_url: String,

    /// Bearer token used for authentication
    api_token: String,
}

impl CloudflareClient {
    /// Creates a new client authenticated with the given API token
    pub fn new(api_token: &str) -> McpResult<Self> {
        Self::with_base_url(api_token, DEFAULT_BASE_URL)
    }

    /// Creates a new client against a custom base URL (used in tests)
    pub fn with_base_url(api_token: &str, base_url: &str) -> McpResult<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends a request and decodes the standard response envelope, raising
    /// on transport failure or an unsuccessful envelope.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> McpResult<ApiEnvelope<T>> {
        let response = request.bearer_auth(&self.api_token).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let envelope: ApiEnvelope<T> = serde_json::from_str(&body)
            .map_err(|e| McpError::Api(format!("unexpected response ({}): {}", status, e)))?;

        if !envelope.success {
            return Err(McpError::Api(join_errors(&envelope.errors, status)));
        }

        Ok(envelope)
    }

    /// Unwraps the result field of an envelope, which the API must populate
    /// on successful non-delete operations.
    fn require_result<T>(envelope: ApiEnvelope<T>) -> McpResult<T> {
        envelope
            .result
            .ok_or_else(|| McpError::Api("response envelope missing result".to_string()))
    }

    // --- Accounts ---

    /// Enumerates every account visible to the token, walking all pages.
    pub async fn list_accounts(&self) -> McpResult<Vec<Account>> {
        let mut accounts: Vec<Account> = Vec::new();
        let mut page: u32 = 1;

        loop {
            let request = self.http.get(self.url("/accounts")).query(&[
                ("page", page.to_string()),
                ("per_page", ACCOUNTS_PER_PAGE.to_string()),
            ]);
            let envelope: ApiEnvelope<Vec<Account>> = self.send(request).await?;

            let batch = envelope.result.unwrap_or_default();
            let fetched = batch.len();
            accounts.extend(batch);

            let total_count = envelope
                .result_info
                .as_ref()
                .and_then(|info| info.total_count)
                .unwrap_or(0) as usize;

            if fetched == 0 || accounts.len() >= total_count {
                break;
            }
            page += 1;
        }

        debug!(count = accounts.len(), "fetched accounts");
        Ok(accounts)
    }

    // --- Workers KV ---

    /// Lists KV namespaces in an account
    pub async fn list_kv_namespaces(
        &self,
        account_id: &str,
        params: &KvNamespaceListParams,
    ) -> McpResult<Vec<KvNamespace>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        push_param(&mut query, "direction", params.direction.as_ref());
        push_param(&mut query, "order", params.order.as_ref());
        push_param(&mut query, "page", params.page.as_ref());
        push_param(&mut query, "per_page", params.per_page.as_ref());

        let path = format!("/accounts/{}/storage/kv/namespaces", account_id);
        let request = self.http.get(self.url(&path)).query(&query);
        let envelope: ApiEnvelope<Vec<KvNamespace>> = self.send(request).await?;
        Ok(envelope.result.unwrap_or_default())
    }

    /// Creates a KV namespace
    pub async fn create_kv_namespace(
        &self,
        account_id: &str,
        title: &str,
    ) -> McpResult<KvNamespace> {
        let path = format!("/accounts/{}/storage/kv/namespaces", account_id);
        let request = self
            .http
            .post(self.url(&path))
            .json(&json!({ "title": title }));
        Self::require_result(self.send(request).await?)
    }

    /// Gets details of a KV namespace
    pub async fn get_kv_namespace(
        &self,
        account_id: &str,
        namespace_id: &str,
    ) -> McpResult<KvNamespace> {
        let path = format!("/accounts/{}/storage/kv/namespaces/{}", account_id, namespace_id);
        Self::require_result(self.send(self.http.get(self.url(&path))).await?)
    }

    /// Updates the title of a KV namespace
    pub async fn update_kv_namespace(
        &self,
        account_id: &str,
        namespace_id: &str,
        title: &str,
    ) -> McpResult<Value> {
        let path = format!("/accounts/{}/storage/kv/namespaces/{}", account_id, namespace_id);
        let request = self
            .http
            .put(self.url(&path))
            .json(&json!({ "title": title }));
        let envelope: ApiEnvelope<Value> = self.send(request).await?;
        Ok(envelope.result.unwrap_or(Value::Null))
    }

    /// Deletes a KV namespace
    pub async fn delete_kv_namespace(
        &self,
        account_id: &str,
        namespace_id: &str,
    ) -> McpResult<Value> {
        let path = format!("/accounts/{}/storage/kv/namespaces/{}", account_id, namespace_id);
        let envelope: ApiEnvelope<Value> = self.send(self.http.delete(self.url(&path))).await?;
        Ok(envelope.result.unwrap_or(Value::Null))
    }

    // --- R2 ---

    /// Lists R2 buckets in an account
    pub async fn list_r2_buckets(
        &self,
        account_id: &str,
        params: &R2BucketListParams,
    ) -> McpResult<R2BucketList> {
        let mut query: Vec<(&str, String)> = Vec::new();
        push_param(&mut query, "cursor", params.cursor.as_ref());
        push_param(&mut query, "direction", params.direction.as_ref());
        push_param(&mut query, "name_contains", params.name_contains.as_ref());
        push_param(&mut query, "per_page", params.per_page.as_ref());
        push_param(&mut query, "start_after", params.start_after.as_ref());

        let path = format!("/accounts/{}/r2/buckets", account_id);
        let request = self.http.get(self.url(&path)).query(&query);
        Self::require_result(self.send(request).await?)
    }

    /// Creates an R2 bucket
    pub async fn create_r2_bucket(&self, account_id: &str, name: &str) -> McpResult<R2Bucket> {
        let path = format!("/accounts/{}/r2/buckets", account_id);
        let request = self
            .http
            .post(self.url(&path))
            .json(&json!({ "name": name }));
        Self::require_result(self.send(request).await?)
    }

    /// Gets details of an R2 bucket
    pub async fn get_r2_bucket(&self, account_id: &str, name: &str) -> McpResult<R2Bucket> {
        let path = format!("/accounts/{}/r2/buckets/{}", account_id, name);
        Self::require_result(self.send(self.http.get(self.url(&path))).await?)
    }

    /// Deletes an R2 bucket
    pub async fn delete_r2_bucket(&self, account_id: &str, name: &str) -> McpResult<Value> {
        let path = format!("/accounts/{}/r2/buckets/{}", account_id, name);
        let envelope: ApiEnvelope<Value> = self.send(self.http.delete(self.url(&path))).await?;
        Ok(envelope.result.unwrap_or(Value::Null))
    }

    // --- D1 ---

    /// Lists D1 databases in an account, returning pagination metadata too
    pub async fn list_d1_databases(
        &self,
        account_id: &str,
        params: &D1DatabaseListParams,
    ) -> McpResult<(Vec<D1Database>, Option<ResultInfo>)> {
        let mut query: Vec<(&str, String)> = Vec::new();
        push_param(&mut query, "name", params.name.as_ref());
        push_param(&mut query, "page", params.page.as_ref());
        push_param(&mut query, "per_page", params.per_page.as_ref());

        let path = format!("/accounts/{}/d1/database", account_id);
        let request = self.http.get(self.url(&path)).query(&query);
        let envelope: ApiEnvelope<Vec<D1Database>> = self.send(request).await?;
        Ok((envelope.result.unwrap_or_default(), envelope.result_info))
    }

    /// Creates a D1 database
    pub async fn create_d1_database(
        &self,
        account_id: &str,
        name: &str,
        primary_location_hint: Option<&str>,
    ) -> McpResult<D1Database> {
        let mut body = json!({ "name": name });
        if let Some(hint) = primary_location_hint {
            body["primary_location_hint"] = json!(hint);
        }

        let path = format!("/accounts/{}/d1/database", account_id);
        let request = self.http.post(self.url(&path)).json(&body);
        Self::require_result(self.send(request).await?)
    }

    /// Gets details of a D1 database
    pub async fn get_d1_database(
        &self,
        account_id: &str,
        database_id: &str,
    ) -> McpResult<D1Database> {
        let path = format!("/accounts/{}/d1/database/{}", account_id, database_id);
        Self::require_result(self.send(self.http.get(self.url(&path))).await?)
    }

    /// Deletes a D1 database
    pub async fn delete_d1_database(
        &self,
        account_id: &str,
        database_id: &str,
    ) -> McpResult<Value> {
        let path = format!("/accounts/{}/d1/database/{}", account_id, database_id);
        let envelope: ApiEnvelope<Value> = self.send(self.http.delete(self.url(&path))).await?;
        Ok(envelope.result.unwrap_or(Value::Null))
    }

    /// Runs a SQL query against a D1 database
    pub async fn query_d1_database(
        &self,
        account_id: &str,
        database_id: &str,
        sql: &str,
        params: &[String],
    ) -> McpResult<Vec<D1QueryResult>> {
        let path = format!("/accounts/{}/d1/database/{}/query", account_id, database_id);
        let request = self
            .http
            .post(self.url(&path))
            .json(&json!({ "sql": sql, "params": params }));
        let envelope: ApiEnvelope<Vec<D1QueryResult>> = self.send(request).await?;
        Ok(envelope.result.unwrap_or_default())
    }

    // --- Workers ---

    /// Lists Worker scripts in an account
    pub async fn list_worker_scripts(
        &self,
        account_id: &str,
    ) -> McpResult<Vec<WorkerScript>> {
        let path = format!("/accounts/{}/workers/scripts", account_id);
        let envelope: ApiEnvelope<Vec<WorkerScript>> =
            self.send(self.http.get(self.url(&path))).await?;
        Ok(envelope.result.unwrap_or_default())
    }

    /// Downloads the source of a Worker script. This endpoint returns the
    /// raw script body rather than the standard envelope.
    pub async fn get_worker_script(
        &self,
        account_id: &str,
        script_name: &str,
    ) -> McpResult<String> {
        let path = format!("/accounts/{}/workers/scripts/{}", account_id, script_name);
        let response = self
            .http
            .get(self.url(&path))
            .bearer_auth(&self.api_token)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(McpError::Api(format!(
                "fetching worker script failed ({}): {}",
                status, body
            )));
        }
        Ok(body)
    }

    /// Deletes a Worker script
    pub async fn delete_worker_script(
        &self,
        account_id: &str,
        script_name: &str,
    ) -> McpResult<()> {
        let path = format!("/accounts/{}/workers/scripts/{}", account_id, script_name);
        let _: ApiEnvelope<Value> = self.send(self.http.delete(self.url(&path))).await?;
        Ok(())
    }

    // --- Zones ---

    /// Lists zones under an account
    pub async fn list_zones(
        &self,
        account_id: &str,
        params: &ZoneListParams,
    ) -> McpResult<Vec<Zone>> {
        let mut query: Vec<(&str, String)> = vec![("account.id", account_id.to_string())];
        push_param(&mut query, "name", params.name.as_ref());
        push_param(&mut query, "status", params.status.as_ref());
        query.push(("page", params.page.unwrap_or(1).to_string()));
        query.push(("per_page", params.per_page.unwrap_or(50).to_string()));
        query.push((
            "order",
            params.order.clone().unwrap_or_else(|| "name".to_string()),
        ));
        query.push((
            "direction",
            params
                .direction
                .clone()
                .unwrap_or_else(|| "desc".to_string()),
        ));

        let request = self.http.get(self.url("/zones")).query(&query);
        let envelope: ApiEnvelope<Vec<Zone>> = self.send(request).await?;
        Ok(envelope.result.unwrap_or_default())
    }

    /// Gets details of a zone
    pub async fn get_zone(&self, zone_id: &str) -> McpResult<Zone> {
        let path = format!("/zones/{}", zone_id);
        Self::require_result(self.send(self.http.get(self.url(&path))).await?)
    }

    /// Lists DNS records in a zone
    pub async fn list_dns_records(
        &self,
        zone_id: &str,
        params: &DnsRecordListParams,
    ) -> McpResult<Vec<DnsRecord>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        push_param(&mut query, "type", params.record_type.as_ref());
        query.push(("page", params.page.unwrap_or(1).to_string()));
        query.push(("per_page", params.per_page.unwrap_or(50).to_string()));

        let path = format!("/zones/{}/dns_records", zone_id);
        let request = self.http.get(self.url(&path)).query(&query);
        let envelope: ApiEnvelope<Vec<DnsRecord>> = self.send(request).await?;
        Ok(envelope.result.unwrap_or_default())
    }
}

/// Appends a query parameter only when the value is present. Absent means
/// the provider default, never an explicit null.
fn push_param<'a, T: ToString>(query: &mut Vec<(&'a str, String)>, key: &'a str, value: Option<&T>) {
    if let Some(value) = value {
        query.push((key, value.to_string()));
    }
}

fn join_errors(errors: &[ApiErrorDetail], status: reqwest::StatusCode) -> String {
    if errors.is_empty() {
        return format!("request failed with status {}", status);
    }
    errors
        .iter()
        .map(|e| format!("{} (code {})", e.message, e.code))
        .collect::<Vec<_>>()
        .join("; ")
}
