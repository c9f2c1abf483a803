//! # MCP Protocol Types
//!
//! JSON-RPC 2.0 message types used on the stdio transport. The Model Context
//! Protocol frames every exchange as a JSON-RPC request, response, or
//! notification; this module defines those three shapes plus the standard
//! error object.

use serde::{Deserialize, Serialize};

use crate::utils::error::{McpError, McpResult};

/// JSON-RPC 2.0 request object for MCP protocol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC version, always "2.0"
    pub jsonrpc: String,
    /// Method name to invoke
    pub method: String,
    /// Parameters for the method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
    /// Unique identifier for the request; absent for notifications
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
}

impl JsonRpcRequest {
    /// Create a new JSON-RPC request
    pub fn new(method: &str, params: Option<serde_json::Value>, id: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: Some(id),
        }
    }

    /// Whether this message is a notification (no response expected)
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }

    /// Deserialize from a JSON string
    pub fn from_str(s: &str) -> McpResult<Self> {
        serde_json::from_str(s).map_err(McpError::Json)
    }
}

/// JSON-RPC 2.0 response object for MCP protocol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC version, always "2.0"
    pub jsonrpc: String,
    /// Result of the method call, must be present if no error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    /// Error information, must be present if no result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    /// Request identifier that this response corresponds to
    pub id: serde_json::Value,
}

impl JsonRpcResponse {
    /// Create a new successful JSON-RPC response
    pub fn success(result: serde_json::Value, id: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    /// Create a new error JSON-RPC response
    pub fn error(error: JsonRpcError, id: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id,
        }
    }
}

/// JSON-RPC 2.0 error object for MCP protocol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code
    pub code: i32,
    /// Error message
    pub message: String,
    /// Additional error data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcError {
    /// Create a new JSON-RPC error
    pub fn new(code: i32, message: &str, data: Option<serde_json::Value>) -> Self {
        Self {
            code,
            message: message.to_string(),
            data,
        }
    }

    /// Parse error (-32700)
    pub fn parse_error(message: &str) -> Self {
        Self::new(-32700, message, None)
    }

    /// Method not found error (-32601)
    pub fn method_not_found(message: &str) -> Self {
        Self::new(-32601, message, None)
    }

    /// Invalid params error (-32602)
    pub fn invalid_params(message: &str) -> Self {
        Self::new(-32602, message, None)
    }

    /// Internal error (-32603)
    pub fn internal_error(message: &str) -> Self {
        Self::new(-32603, message, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_roundtrip() {
        let request = JsonRpcRequest::new("tools/list", None, json!(1));
        let serialized = serde_json::to_string(&request).unwrap();
        let parsed = JsonRpcRequest::from_str(&serialized).unwrap();

        assert_eq!(parsed.jsonrpc, "2.0");
        assert_eq!(parsed.method, "tools/list");
        assert_eq!(parsed.id, Some(json!(1)));
        assert!(!parsed.is_notification());
    }

    #[test]
    fn test_notification_has_no_id() {
        let parsed = JsonRpcRequest::from_str(
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        )
        .unwrap();
        assert!(parsed.is_notification());
    }

    #[test]
    fn test_error_response_shape() {
        let response =
            JsonRpcResponse::error(JsonRpcError::method_not_found("no such method"), json!(7));
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["error"]["code"], json!(-32601));
        assert_eq!(value["error"]["message"], json!("no such method"));
        assert!(value.get("result").is_none());
    }
}
