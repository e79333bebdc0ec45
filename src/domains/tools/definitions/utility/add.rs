//! Add tool definition.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use crate::domains::tools::definitions::common::{error_result, route_params, success_result};

#[cfg(feature = "http")]
use crate::domains::tools::{
    ToolError,
    definitions::common::{http_params, http_response},
};

/// Parameters for the add tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddParams {
    #[schemars(description = "First number")]
    pub a: i64,

    #[schemars(description = "Second number")]
    pub b: i64,
}

/// Add tool - sums two integers.
pub struct AddTool;

impl AddTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "add";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Add two integers together and return the sum.";

    pub fn execute(params: &AddParams) -> CallToolResult {
        info!("Add tool called: {} + {}", params.a, params.b);

        match params.a.checked_add(params.b) {
            Some(sum) => success_result(sum.to_string()),
            None => error_result(&format!(
                "Integer overflow adding {} and {}",
                params.a, params.b
            )),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let params: AddParams = http_params(arguments)?;
        http_response(&Self::execute(&params))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<AddParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>() -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            async move {
                let params: AddParams = route_params(args)?;
                Ok(Self::execute(&params))
            }
            .boxed()
        })
    }
}
