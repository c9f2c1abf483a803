use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Fixed payload returned when a tool needs an account id and none resolved.
/// This is a recoverable condition, not a provider error.
pub const MISSING_ACCOUNT_ID_TEXT: &str = "No currently active accountId. Try listing your accounts (accounts_list) and then setting an active account (set_active_account)";

/// A single content segment in a tool result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolContent {
    /// Text content
    #[serde(rename = "text")]
    Text {
        /// The text content
        text: String,
    },
}

/// The normalized result of a tool call. Success and failure share the same
/// structure, so the protocol layer never branches on result shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// List of content items in the result
    pub content: Vec<ToolContent>,
}

impl ToolResult {
    /// Creates a result with a literal text payload
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
        }
    }

    /// Creates a success result carrying `data` serialized as JSON.
    ///
    /// Serialization of a JSON-compatible value cannot fail; if a caller
    /// passes something that does fail, the failure is reported through the
    /// envelope rather than a panic.
    pub fn json<T: Serialize>(data: &T) -> Self {
        match serde_json::to_string(data) {
            Ok(text) => Self::text(text),
            Err(e) => Self::error(e, "serializing result"),
        }
    }

    /// Creates a failure result with the text `"Error {context}: {error}"`
    pub fn error<E: fmt::Display>(error: E, context: &str) -> Self {
        Self::text(format!("Error {}: {}", context, error))
    }

    /// Returns the text of the first content segment, if any
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().map(|c| match c {
            ToolContent::Text { text } => text.as_str(),
        })
    }

    /// Parses the first content segment as JSON
    pub fn first_json(&self) -> Option<Value> {
        self.first_text()
            .and_then(|text| serde_json::from_str(text).ok())
    }
}

/// The sentinel result used when account resolution yields no usable id
pub fn missing_account_id() -> ToolResult {
    ToolResult::text(MISSING_ACCOUNT_ID_TEXT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_result_text() {
        let result = ToolResult::error("boom", "listing X");
        assert_eq!(result.first_text(), Some("Error listing X: boom"));
    }

    #[test]
    fn test_json_result_roundtrips() {
        let result = ToolResult::json(&json!({ "a": 1 }));
        assert_eq!(result.first_json(), Some(json!({ "a": 1 })));
    }

    #[test]
    fn test_wire_shape_is_uniform() {
        let success = serde_json::to_value(ToolResult::json(&json!({ "ok": true }))).unwrap();
        let failure = serde_json::to_value(ToolResult::error("nope", "doing thing")).unwrap();

        assert_eq!(success["content"][0]["type"], json!("text"));
        assert_eq!(failure["content"][0]["type"], json!("text"));
        assert_eq!(
            failure["content"][0]["text"],
            json!("Error doing thing: nope")
        );
    }

    #[test]
    fn test_sentinel_payload() {
        let result = missing_account_id();
        assert_eq!(result.first_text(), Some(MISSING_ACCOUNT_ID_TEXT));
    }
}
