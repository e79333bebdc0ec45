//! Uniform response envelope for the expense tools.
//!
//! Successful calls return their payload as-is (`add_expense` wraps its id in
//! a `status: "success"` object, the queries return plain arrays). Any
//! storage failure becomes `{"status": "error", "message": ...}` so the
//! client always receives a well-formed object.

use rmcp::model::{CallToolResult, Content};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domains::expenses::{StorageError, StorageResult};

/// Message returned alongside the id of a newly added expense.
pub const EXPENSE_ADDED: &str = "Expense added successfully";

/// Status marker carried by envelope objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Failure reported to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub status: Status,
    pub message: String,
}

/// Successful `add_expense` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseAdded {
    pub status: Status,
    pub id: i64,
    pub message: String,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
        }
    }
}

impl ExpenseAdded {
    pub fn new(id: i64) -> Self {
        Self {
            status: Status::Success,
            id,
            message: EXPENSE_ADDED.to_string(),
        }
    }
}

/// Either the payload of a successful call or an error envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolOutcome<T> {
    Success(T),
    Failure(ErrorEnvelope),
}

impl<T: Serialize> ToolOutcome<T> {
    /// Wrap a storage result, logging failures.
    pub fn from_storage(operation: &str, result: StorageResult<T>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(e) => {
                error!("{} failed: {}", operation, e);
                Self::failure(&e)
            }
        }
    }

    pub fn failure(err: &StorageError) -> Self {
        Self::Failure(ErrorEnvelope::new(err.to_string()))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Render the outcome as an MCP tool result.
    ///
    /// The JSON document is the text content; failures set `isError`.
    pub fn into_call_result(self) -> CallToolResult {
        let rendered = serde_json::to_string_pretty(&self);
        match (rendered, self.is_failure()) {
            (Ok(text), false) => CallToolResult::success(vec![Content::text(text)]),
            (Ok(text), true) => CallToolResult::error(vec![Content::text(text)]),
            (Err(e), _) => {
                let envelope = serde_json::json!({
                    "status": "error",
                    "message": format!("Failed to encode response: {}", e),
                });
                CallToolResult::error(vec![Content::text(envelope.to_string())])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::result_text;
    use serde_json::json;

    #[test]
    fn test_expense_added_shape() {
        let value = serde_json::to_value(ToolOutcome::Success(ExpenseAdded::new(7))).unwrap();
        assert_eq!(
            value,
            json!({ "status": "success", "id": 7, "message": "Expense added successfully" })
        );
    }

    #[test]
    fn test_failure_shape() {
        let err = StorageError::Interrupted("shutting down".to_string());
        let outcome: ToolOutcome<Vec<i64>> = ToolOutcome::from_storage("list", Err(err));
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            value,
            json!({ "status": "error", "message": "storage task interrupted: shutting down" })
        );
    }

    #[test]
    fn test_success_payload_is_unwrapped() {
        let outcome = ToolOutcome::Success(vec![1, 2, 3]);
        let result = outcome.into_call_result();
        assert_ne!(result.is_error, Some(true));
        let parsed: serde_json::Value = serde_json::from_str(result_text(&result)).unwrap();
        assert_eq!(parsed, json!([1, 2, 3]));
    }

    #[test]
    fn test_failure_sets_is_error() {
        let outcome: ToolOutcome<()> = ToolOutcome::Failure(ErrorEnvelope::new("disk full"));
        let result = outcome.into_call_result();
        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).contains("disk full"));
    }
}
