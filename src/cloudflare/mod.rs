//! Typed client for the Cloudflare v4 REST API.
//!
//! This module is the outbound collaborator for every tool handler. It wraps
//! `reqwest` with bearer-token authentication and the standard Cloudflare
//! response envelope, and exposes one method per API operation the tools
//! consume. Transport and API failures surface as errors; the client never
//! returns sentinel values.

mod client;
mod types;

pub use client::{CloudflareClient, DEFAULT_BASE_URL};
pub use types::{
    Account, ApiEnvelope, ApiErrorDetail, D1Database, D1DatabaseListParams, D1QueryResult,
    DnsRecord, DnsRecordListParams, KvNamespace, KvNamespaceListParams, R2Bucket, R2BucketList,
    R2BucketListParams, ResultInfo, WorkerScript, Zone, ZoneListParams,
};
