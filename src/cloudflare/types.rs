use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Standard response envelope returned by the Cloudflare v4 API
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the request succeeded
    pub success: bool,

    /// Errors reported by the API, empty on success
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,

    /// The operation result, absent on failure
    pub result: Option<T>,

    /// Pagination metadata, present on list endpoints
    pub result_info: Option<ResultInfo>,
}

/// A single error entry in an API envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    /// Cloudflare error code
    pub code: i64,

    /// Human-readable error message
    pub message: String,
}

/// Pagination metadata for list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultInfo {
    /// Current page number (1-based)
    pub page: Option<u32>,

    /// Number of results per page
    pub per_page: Option<u32>,

    /// Number of results on this page
    pub count: Option<u32>,

    /// Total number of results across all pages
    pub total_count: Option<u32>,
}

/// An account visible under the configured API token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account identifier
    pub id: String,

    /// Account display name
    pub name: String,
}

/// A Workers KV namespace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KvNamespace {
    /// Namespace identifier
    pub id: String,

    /// Human-readable namespace title
    pub title: String,

    /// Whether keys may contain URL-encoded characters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_url_encoding: Option<bool>,
}

/// An R2 bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct R2Bucket {
    /// Bucket name
    pub name: String,

    /// Creation timestamp, as reported by the API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,

    /// Location hint the bucket was created with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Storage class for newly uploaded objects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,
}

/// Result payload of the R2 bucket list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct R2BucketList {
    /// Buckets on this page
    #[serde(default)]
    pub buckets: Vec<R2Bucket>,
}

/// A D1 database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct D1Database {
    /// Database identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    /// Database name
    pub name: String,

    /// Database version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Number of tables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_tables: Option<u64>,

    /// Total size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,

    /// Creation timestamp, as reported by the API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Result of a single D1 SQL statement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct D1QueryResult {
    /// Rows returned by the statement
    #[serde(default)]
    pub results: Vec<Value>,

    /// Whether the statement succeeded
    #[serde(default)]
    pub success: bool,

    /// Execution metadata (rows read/written, duration)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

/// A Worker script summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerScript {
    /// Script name
    pub id: String,

    /// Last modification timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<String>,

    /// Creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<String>,
}

/// A zone under an account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    /// Zone identifier
    pub id: String,

    /// Zone name (domain)
    pub name: String,

    /// Zone status (active, pending, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Whether the zone is paused
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,

    /// Zone type (full, partial)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub zone_type: Option<String>,

    /// Development mode time remaining in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub development_mode: Option<i64>,

    /// Assigned name servers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_servers: Option<Vec<String>>,

    /// Creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<String>,

    /// Last modification timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<String>,
}

/// Optional filters for listing KV namespaces
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KvNamespaceListParams {
    /// Direction to order namespaces (asc/desc)
    pub direction: Option<String>,

    /// Field to order namespaces by (id/title)
    pub order: Option<String>,

    /// Page number of results (starts at 1)
    pub page: Option<u32>,

    /// Number of namespaces per page (1-100)
    pub per_page: Option<u32>,
}

/// Optional filters for listing R2 buckets
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct R2BucketListParams {
    /// Cursor for pagination
    pub cursor: Option<String>,

    /// Direction to order buckets
    pub direction: Option<String>,

    /// Filter by bucket name containing this string
    pub name_contains: Option<String>,

    /// Number of buckets per page
    pub per_page: Option<u32>,

    /// Start listing after this bucket name
    pub start_after: Option<String>,
}

/// Optional filters for listing D1 databases
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct D1DatabaseListParams {
    /// Filter by database name
    pub name: Option<String>,

    /// Page number
    pub page: Option<u32>,

    /// Number of results per page
    pub per_page: Option<u32>,
}

/// Optional filters for listing zones
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZoneListParams {
    /// Filter zones by name
    pub name: Option<String>,

    /// Filter zones by status
    pub status: Option<String>,

    /// Page number for pagination
    pub page: Option<u32>,

    /// Number of zones per page
    pub per_page: Option<u32>,

    /// Field to order results by
    pub order: Option<String>,

    /// Direction to order results
    pub direction: Option<String>,
}

/// Optional filters for listing DNS records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DnsRecordListParams {
    /// Filter by record type
    #[serde(rename = "type")]
    pub record_type: Option<String>,

    /// Page number
    pub page: Option<u32>,

    /// Records per page
    pub per_page: Option<u32>,
}

/// A DNS record in a zone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Record identifier
    pub id: String,

    /// Record type (A, AAAA, CNAME, TXT, MX, ...)
    #[serde(rename = "type")]
    pub record_type: String,

    /// Record name
    pub name: String,

    /// Record content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Whether the record is proxied through Cloudflare
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,

    /// Time to live in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,
}
