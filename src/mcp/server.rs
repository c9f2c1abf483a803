//! Protocol server: named-tool registry and stdio JSON-RPC dispatch.
//!
//! Tools are registered once at startup by the category registrars and the
//! set is fixed afterwards. At call time the host protocol invokes
//! `tools/call` and the matching handler runs; handlers always produce a
//! well-formed [`ToolResult`](super::tools::ToolResult) envelope, so the
//! protocol layer never sees a raw provider error.

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, RwLock};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

use crate::mcp::tools::ToolResult;
use crate::mcp::types::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use crate::utils::error::{McpError, McpResult};

/// MCP protocol revision implemented by this server
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// A named, schema-described tool exposed over the protocol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    /// Unique identifier for the tool
    pub name: String,

    /// Human-readable description of functionality
    pub description: String,

    /// JSON Schema defining expected parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Type for async tool handler functions
pub type ToolHandler = Arc<dyn Fn(Value) -> BoxFuture<'static, ToolResult> + Send + Sync>;

/// Parameters of a `tools/call` request
#[derive(Debug, Clone, Deserialize)]
struct CallToolParams {
    /// Name of the tool to call
    name: String,

    /// Arguments to pass to the tool
    arguments: Option<Value>,
}

/// MCP server holding the registered tool set
pub struct McpServer {
    /// Server name reported during initialization
    name: String,

    /// Server version reported during initialization
    version: String,

    /// Registered tools, in registration order
    tools: RwLock<Vec<Tool>>,

    /// Tool handlers by name
    handlers: RwLock<HashMap<String, ToolHandler>>,
}

impl std::fmt::Debug for McpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpServer")
            .field("name", &self.name)
            .field("tool_count", &self.tool_count())
            .finish_non_exhaustive()
    }
}

impl McpServer {
    /// Creates a new server with the given identity
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            tools: RwLock::new(Vec::new()),
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a tool with its name, description, parameter schema, and
    /// async handler. Registering the same name twice replaces the earlier
    /// handler; the dispatcher never does this in normal operation.
    pub fn tool<F, Fut>(&self, name: &str, description: &str, input_schema: Value, handler: F)
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ToolResult> + Send + 'static,
    {
        let mut tools = self.tools.write().unwrap_or_else(|e| e.into_inner());
        let mut handlers = self.handlers.write().unwrap_or_else(|e| e.into_inner());

        if handlers.contains_key(name) {
            warn!(tool = name, "tool registered twice, replacing handler");
            tools.retain(|t| t.name != name);
        }

        tools.push(Tool {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
        });
        handlers.insert(
            name.to_string(),
            Arc::new(move |args: Value| {
                let fut: BoxFuture<'static, ToolResult> = Box::pin(handler(args));
                fut
            }),
        );
    }

    /// Returns the number of registered tools
    pub fn tool_count(&self) -> usize {
        self.tools.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Returns the registered tools, in registration order
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tools.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Invokes a tool by name
    pub async fn call_tool(&self, name: &str, arguments: Value) -> McpResult<ToolResult> {
        let handler = {
            let handlers = self.handlers.read().unwrap_or_else(|e| e.into_inner());
            handlers
                .get(name)
                .cloned()
                .ok_or_else(|| McpError::ToolNotFound(name.to_string()))?
        };

        debug!(tool = name, "calling tool");
        Ok(handler(arguments).await)
    }

    /// Handles one JSON-RPC request. Notifications produce no response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            debug!(method = %request.method, "ignoring notification");
            return None;
        }
        let id = request.id.unwrap_or(Value::Null);

        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(
                json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": { "tools": {} },
                    "serverInfo": { "name": self.name, "version": self.version },
                }),
                id,
            ),
            "ping" => JsonRpcResponse::success(json!({}), id),
            "tools/list" => {
                JsonRpcResponse::success(json!({ "tools": self.list_tools() }), id)
            }
            "tools/call" => {
                let params: CallToolParams =
                    match serde_json::from_value(request.params.unwrap_or(Value::Null)) {
                        Ok(params) => params,
                        Err(e) => {
                            return Some(JsonRpcResponse::error(
                                JsonRpcError::invalid_params(&format!("Invalid params: {}", e)),
                                id,
                            ));
                        }
                    };

                let arguments = params.arguments.unwrap_or_else(|| json!({}));
                match self.call_tool(&params.name, arguments).await {
                    Ok(result) => match serde_json::to_value(&result) {
                        Ok(value) => JsonRpcResponse::success(value, id),
                        Err(e) => JsonRpcResponse::error(
                            JsonRpcError::internal_error(&format!(
                                "Serialization error: {}",
                                e
                            )),
                            id,
                        ),
                    },
                    Err(e) => JsonRpcResponse::error(
                        JsonRpcError::invalid_params(&e.to_string()),
                        id,
                    ),
                }
            }
            other => JsonRpcResponse::error(
                JsonRpcError::method_not_found(&format!("Method '{}' not found", other)),
                id,
            ),
        };

        Some(response)
    }

    /// Runs the server over stdio: newline-delimited JSON-RPC requests on
    /// stdin, responses on stdout. Returns when stdin reaches EOF.
    pub async fn run(&self) -> McpResult<()> {
        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let mut lines = BufReader::new(stdin).lines();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let response = match JsonRpcRequest::from_str(line) {
                Ok(request) => self.handle_request(request).await,
                Err(e) => {
                    warn!(error = %e, "failed to parse request");
                    Some(JsonRpcResponse::error(
                        JsonRpcError::parse_error(&format!("Parse error: {}", e)),
                        Value::Null,
                    ))
                }
            };

            if let Some(response) = response {
                let mut payload = serde_json::to_vec(&response)?;
                payload.push(b'\n');
                stdout.write_all(&payload).await?;
                stdout.flush().await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo_server() -> McpServer {
        let server = McpServer::new("test-server", "0.0.1");
        server.tool(
            "echo",
            "Echoes the input",
            json!({
                "type": "object",
                "properties": { "message": { "type": "string" } }
            }),
            |args: Value| async move {
                let message = args
                    .get("message")
                    .and_then(|v| v.as_str())
                    .unwrap_or("No message")
                    .to_string();
                ToolResult::text(message)
            },
        );
        server
    }

    #[tokio::test]
    async fn test_tool_registration_and_listing() {
        let server = echo_server();
        let tools = server.list_tools();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "echo");
    }

    #[tokio::test]
    async fn test_tool_call() {
        let server = echo_server();
        let result = server
            .call_tool("echo", json!({ "message": "Hello, world!" }))
            .await
            .unwrap();
        assert_eq!(result.first_text(), Some("Hello, world!"));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let server = echo_server();
        let result = server.call_tool("unknown", json!({})).await;
        assert!(matches!(result, Err(McpError::ToolNotFound(_))));
    }

    #[tokio::test]
    async fn test_initialize_request() {
        let server = echo_server();
        let request = JsonRpcRequest::new("initialize", None, json!(1));
        let response = server.handle_request(request).await.unwrap();

        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], json!(PROTOCOL_VERSION));
        assert_eq!(result["serverInfo"]["name"], json!("test-server"));
    }

    #[tokio::test]
    async fn test_tools_call_request() {
        let server = echo_server();
        let request = JsonRpcRequest::new(
            "tools/call",
            Some(json!({ "name": "echo", "arguments": { "message": "hi" } })),
            json!(2),
        );
        let response = server.handle_request(request).await.unwrap();

        let result = response.result.unwrap();
        assert_eq!(result["content"][0]["text"], json!("hi"));
    }

    #[tokio::test]
    async fn test_notification_produces_no_response() {
        let server = echo_server();
        let request =
            JsonRpcRequest::from_str(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
                .unwrap();
        assert!(server.handle_request(request).await.is_none());
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let server = echo_server();
        let request = JsonRpcRequest::new("bogus/method", None, json!(3));
        let response = server.handle_request(request).await.unwrap();
        assert_eq!(response.error.unwrap().code, -32601);
    }
}
