//! Add expense tool definition.
//!
//! Appends one row to the expense table and reports the assigned id.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, de::Error as _};
use std::sync::Arc;
use tracing::{info, instrument};

use super::envelope::{ExpenseAdded, ToolOutcome};
use crate::domains::expenses::{ExpenseStore, NewExpense, run_blocking};
use crate::domains::tools::definitions::common::route_params;

#[cfg(feature = "http")]
use crate::domains::tools::{
    ToolError,
    definitions::common::{http_params, http_response},
};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the add expense tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddExpenseParams {
    /// Date of the expense.
    #[schemars(description = "Date of the expense in YYYY-MM-DD format")]
    pub date: String,

    /// Amount spent. Numeric strings are accepted.
    #[schemars(description = "Amount spent", with = "f64")]
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,

    /// Category, free text.
    #[schemars(description = "Expense category, e.g. \"Food & Dining\"")]
    pub category: String,

    #[schemars(description = "Optional subcategory")]
    #[serde(default)]
    pub subcategory: String,

    #[schemars(description = "Optional free-form note")]
    #[serde(default)]
    pub note: String,
}

impl From<AddExpenseParams> for NewExpense {
    fn from(params: AddExpenseParams) -> Self {
        NewExpense {
            date: params.date,
            amount: params.amount,
            category: params.category,
            subcategory: params.subcategory,
            note: params.note,
        }
    }
}

/// Accept either a JSON number or a string holding one.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(f64),
        Text(String),
    }

    let amount = match Amount::deserialize(deserializer)? {
        Amount::Number(n) => n,
        Amount::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("invalid amount: {:?}", s)))?,
    };

    // JSON cannot carry NaN or infinity back out of list_expenses
    if !amount.is_finite() {
        return Err(D::Error::custom(format!("amount must be finite, got {}", amount)));
    }
    Ok(amount)
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Add expense tool - records a new expense.
pub struct AddExpenseTool;

impl AddExpenseTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "add_expense";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Add a new expense entry to the database. Returns the id assigned to the new entry.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(date = %params.date, category = %params.category))]
    pub async fn execute(params: AddExpenseParams, store: &Arc<ExpenseStore>) -> CallToolResult {
        info!("Add expense tool called");

        let expense = NewExpense::from(params);
        let result = run_blocking(store, move |s| s.insert(&expense)).await;

        if let Ok(id) = &result {
            info!("Expense {} added", id);
        }

        ToolOutcome::from_storage("add_expense", result.map(ExpenseAdded::new)).into_call_result()
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        store: Arc<ExpenseStore>,
    ) -> Result<serde_json::Value, ToolError> {
        let params: AddExpenseParams = http_params(arguments)?;
        let result = Self::execute(params, &store).await;
        http_response(&result)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<AddExpenseParams>(),
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
                let params: AddExpenseParams = route_params(args)?;
                Ok(Self::execute(params, &store).await)
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
