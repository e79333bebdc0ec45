//! Tool Registry - tool names and HTTP dispatch.
//!
//! The rmcp router (see `router.rs`) serves STDIO/TCP sessions; the HTTP
//! transport dispatches through [`ToolRegistry::call_tool`] instead.

use std::sync::Arc;

#[cfg(feature = "http")]
use tracing::warn;

use crate::domains::expenses::ExpenseStore;

#[cfg(feature = "http")]
use super::ToolError;
use super::definitions::{AddExpenseTool, AddTool, ListExpensesTool, RandomNumberTool, SummarizeTool};

/// Tool registry - knows every tool and the store the expense tools use.
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    store: Arc<ExpenseStore>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(store: Arc<ExpenseStore>) -> Self {
        Self { store }
    }

    /// Names of all registered tools, expense tools first.
    pub fn tool_names() -> Vec<&'static str> {
        vec![
            AddExpenseTool::NAME,
            ListExpensesTool::NAME,
            SummarizeTool::NAME,
            AddTool::NAME,
            RandomNumberTool::NAME,
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        match name {
            AddExpenseTool::NAME => AddExpenseTool::http_handler(arguments, self.store.clone()).await,
            ListExpensesTool::NAME => {
                ListExpensesTool::http_handler(arguments, self.store.clone()).await
            }
            SummarizeTool::NAME => SummarizeTool::http_handler(arguments, self.store.clone()).await,
            AddTool::NAME => AddTool::http_handler(arguments),
            RandomNumberTool::NAME => RandomNumberTool::http_handler(arguments),
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}
