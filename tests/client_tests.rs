//! Cloudflare client behavior against a local HTTP stub.

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use mcp_cloudflare::{CloudflareClient, McpError};

/// Spawns a one-request-per-connection HTTP stub and returns its base URL.
/// The closure maps the raw request head to a JSON response body.
async fn spawn_stub<F>(respond: F) -> String
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let (mut socket, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => return,
            };

            let mut buf = vec![0u8; 8192];
            let n = socket.read(&mut buf).await.unwrap_or(0);
            let request = String::from_utf8_lossy(&buf[..n]).to_string();

            let body = respond(&request);
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
        }
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_list_accounts_accumulates_all_pages() {
    let requests: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let seen = requests.clone();

    let base_url = spawn_stub(move |request| {
        seen.lock().unwrap().push(request.to_string());
        if request.contains("page=1") {
            r#"{"success":true,"errors":[],"result":[{"id":"acc-1","name":"One"},{"id":"acc-2","name":"Two"}],"result_info":{"page":1,"per_page":50,"count":2,"total_count":3}}"#.to_string()
        } else {
            r#"{"success":true,"errors":[],"result":[{"id":"acc-3","name":"Three"}],"result_info":{"page":2,"per_page":50,"count":1,"total_count":3}}"#.to_string()
        }
    })
    .await;

    let client = CloudflareClient::with_base_url("test-token", &base_url).unwrap();
    let accounts = client.list_accounts().await.unwrap();

    let ids: Vec<&str> = accounts.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["acc-1", "acc-2", "acc-3"]);

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| r.contains("Bearer test-token")));
}

#[tokio::test]
async fn test_list_accounts_stops_on_empty_page() {
    // A provider that claims more results than it returns must not loop.
    let base_url = spawn_stub(|request| {
        if request.contains("page=1") {
            r#"{"success":true,"errors":[],"result":[{"id":"acc-1","name":"One"}],"result_info":{"page":1,"per_page":50,"count":1,"total_count":10}}"#.to_string()
        } else {
            r#"{"success":true,"errors":[],"result":[],"result_info":{"page":2,"per_page":50,"count":0,"total_count":10}}"#.to_string()
        }
    })
    .await;

    let client = CloudflareClient::with_base_url("test-token", &base_url).unwrap();
    let accounts = client.list_accounts().await.unwrap();

    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].id, "acc-1");
}

#[tokio::test]
async fn test_unsuccessful_envelope_surfaces_api_error() {
    let base_url = spawn_stub(|_| {
        r#"{"success":false,"errors":[{"code":10000,"message":"Authentication error"}],"result":null}"#.to_string()
    })
    .await;

    let client = CloudflareClient::with_base_url("bad-token", &base_url).unwrap();
    let err = client.list_accounts().await.unwrap_err();

    assert!(matches!(err, McpError::Api(_)));
    assert!(err.to_string().contains("Authentication error (code 10000)"));
}
