//! Helpers shared by every tool definition.
//!
//! Argument decoding for both dispatch paths (rmcp routes and the HTTP
//! registry) and conversion of results into the HTTP response shape.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content, JsonObject},
};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domains::tools::ToolError;

/// Decode route arguments into a params struct (STDIO/TCP transport).
pub fn route_params<P: DeserializeOwned>(arguments: JsonObject) -> Result<P, McpError> {
    serde_json::from_value(serde_json::Value::Object(arguments))
        .map_err(|e| McpError::invalid_params(e.to_string(), None))
}

/// Decode raw JSON arguments into a params struct (HTTP transport).
#[cfg(feature = "http")]
pub fn http_params<P: DeserializeOwned>(arguments: serde_json::Value) -> Result<P, ToolError> {
    let arguments = match arguments {
        serde_json::Value::Null => serde_json::Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(arguments).map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// Serialize a tool result for the HTTP transport.
#[cfg(feature = "http")]
pub fn http_response(result: &CallToolResult) -> Result<serde_json::Value, ToolError> {
    serde_json::to_value(result).map_err(|e| ToolError::internal(e.to_string()))
}

/// Create an error result with a plain text message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a success result with text content.
pub fn success_result(content: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content.into())])
}

/// Extract the first text block of a result. Test helper.
#[cfg(test)]
pub fn result_text(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        rmcp::model::RawContent::Text(text) => &text.text,
        _ => panic!("Expected text content"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Pair {
        a: i64,
        #[serde(default)]
        b: i64,
    }

    #[test]
    fn test_route_params_decodes_object() {
        let mut args = JsonObject::new();
        args.insert("a".to_string(), serde_json::json!(4));
        let pair: Pair = route_params(args).unwrap();
        assert_eq!((pair.a, pair.b), (4, 0));
    }

    #[test]
    fn test_route_params_rejects_missing_field() {
        let result: Result<Pair, _> = route_params(JsonObject::new());
        assert!(result.is_err());
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_params_rejects_wrong_type() {
        let result: Result<Pair, _> = http_params(serde_json::json!({ "a": "four" }));
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }

    #[test]
    fn test_error_result_is_flagged() {
        let result = error_result("boom");
        assert_eq!(result.is_error, Some(true));
        assert_eq!(result_text(&result), "boom");
    }
}
