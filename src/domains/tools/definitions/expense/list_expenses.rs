//! List expenses tool definition.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use super::envelope::ToolOutcome;
use crate::domains::expenses::{ExpenseStore, run_blocking};
use crate::domains::tools::definitions::common::route_params;

#[cfg(feature = "http")]
use crate::domains::tools::{
    ToolError,
    definitions::common::{http_params, http_response},
};

/// Parameters for the list expenses tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListExpensesParams {
    /// First date of the range, inclusive.
    #[schemars(description = "Start date (YYYY-MM-DD), inclusive")]
    pub start_date: String,

    /// Last date of the range, inclusive.
    #[schemars(description = "End date (YYYY-MM-DD), inclusive")]
    pub end_date: String,
}

/// List expenses tool - returns the expenses recorded in a date range.
pub struct ListExpensesTool;

impl ListExpensesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "list_expenses";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List expense entries in a date range (inclusive), most recent first.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(start = %params.start_date, end = %params.end_date))]
    pub async fn execute(params: ListExpensesParams, store: &Arc<ExpenseStore>) -> CallToolResult {
        info!("List expenses tool called");

        let ListExpensesParams {
            start_date,
            end_date,
        } = params;
        let result = run_blocking(store, move |s| s.list_range(&start_date, &end_date)).await;

        if let Ok(expenses) = &result {
            info!("Found {} expense(s)", expenses.len());
        }

        ToolOutcome::from_storage("list_expenses", result).into_call_result()
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        store: Arc<ExpenseStore>,
    ) -> Result<serde_json::Value, ToolError> {
        let params: ListExpensesParams = http_params(arguments)?;
        let result = Self::execute(params, &store).await;
        http_response(&result)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ListExpensesParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(store: Arc<ExpenseStore>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let store = store.clone();
            async move {
                let params: ListExpensesParams = route_params(args)?;
                Ok(Self::execute(params, &store).await)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::StorageConfig;
    use crate::domains::expenses::{Expense, NewExpense};
    use crate::domains::tools::definitions::common::result_text;
    use tempfile::TempDir;

    fn test_store() -> (TempDir, Arc<ExpenseStore>) {
        let dir = TempDir::new().unwrap();
        let store = ExpenseStore::new(StorageConfig::at(dir.path().join("expenses.db")));
        store.initialize().unwrap();
        (dir, Arc::new(store))
    }

    fn range(start: &str, end: &str) -> ListExpensesParams {
        ListExpensesParams {
            start_date: start.to_string(),
            end_date: end.to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_returns_records_as_objects() {
        let (_dir, store) = test_store();
        store
            .insert(&NewExpense::new("2024-01-05", 12.5, "Food & Dining").with_subcategory("Lunch"))
            .unwrap();
        store
            .insert(&NewExpense::new("2024-01-10", 40.0, "Transportation"))
            .unwrap();

        let result = ListExpensesTool::execute(range("2024-01-01", "2024-01-31"), &store).await;
        assert_ne!(result.is_error, Some(true));

        let listed: Vec<Expense> = serde_json::from_str(result_text(&result)).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].category, "Transportation");
        assert_eq!(listed[1].subcategory, "Lunch");

        let raw: serde_json::Value = serde_json::from_str(result_text(&result)).unwrap();
        let keys: Vec<_> = raw[0].as_object().unwrap().keys().cloned().collect();
        for key in ["id", "date", "amount", "category", "subcategory", "note"] {
            assert!(keys.contains(&key.to_string()), "missing {}", key);
        }
    }

    #[tokio::test]
    async fn test_list_inverted_range_is_empty_array() {
        let (_dir, store) = test_store();
        store.insert(&NewExpense::new("2024-01-05", 1.0, "Other")).unwrap();

        let result = ListExpensesTool::execute(range("2024-12-31", "2024-01-01"), &store).await;
        assert_ne!(result.is_error, Some(true));
        let raw: serde_json::Value = serde_json::from_str(result_text(&result)).unwrap();
        assert_eq!(raw, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_list_storage_failure_envelope() {
        let dir = TempDir::new().unwrap();
        // Never initialized: the table does not exist
        let store = Arc::new(ExpenseStore::new(StorageConfig::at(
            dir.path().join("missing.db"),
        )));

        let result = ListExpensesTool::execute(range("2024-01-01", "2024-01-31"), &store).await;
        assert_eq!(result.is_error, Some(true));
        let raw: serde_json::Value = serde_json::from_str(result_text(&result)).unwrap();
        assert_eq!(raw["status"], "error");
    }
}
