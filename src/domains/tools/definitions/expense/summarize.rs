//! Summarize expenses tool definition.
//!
//! Groups the expenses of a date range by category, optionally limited to a
//! single category.

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

/// Parameters for the summarize tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SummarizeParams {
    #[schemars(description = "Start date (YYYY-MM-DD), inclusive")]
    pub start_date: String,

    #[schemars(description = "End date (YYYY-MM-DD), inclusive")]
    pub end_date: String,

    /// Restrict the summary to one category.
    #[schemars(description = "Only summarize this category (optional)")]
    #[serde(default)]
    pub category: Option<String>,
}

/// Summarize tool - per-category totals and counts.
pub struct SummarizeTool;

impl SummarizeTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "summarize";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Summarize expenses by category within a date range (inclusive). Returns total amount and number of entries per category, largest total first.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(start = %params.start_date, end = %params.end_date))]
    pub async fn execute(params: SummarizeParams, store: &Arc<ExpenseStore>) -> CallToolResult {
        info!("Summarize tool called (category: {:?})", params.category);

        let SummarizeParams {
            start_date,
            end_date,
            category,
        } = params;
        let result = run_blocking(store, move |s| {
            s.summarize(&start_date, &end_date, category.as_deref())
        })
        .await;

        if let Ok(groups) = &result {
            info!("Summarized {} categories", groups.len());
        }

        ToolOutcome::from_storage("summarize", result).into_call_result()
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        store: Arc<ExpenseStore>,
    ) -> Result<serde_json::Value, ToolError> {
        let params: SummarizeParams = http_params(arguments)?;
        let result = Self::execute(params, &store).await;
        http_response(&result)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SummarizeParams>(),
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
                let params: SummarizeParams = route_params(args)?;
                Ok(Self::execute(params, &store).await)
            }
            .boxed()
        })
    }
}
