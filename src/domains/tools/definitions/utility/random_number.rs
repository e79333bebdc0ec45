//! Random number tool definition.

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

fn default_min_value() -> i64 {
    1
}

fn default_max_val() -> i64 {
    100
}

/// Parameters for the random number tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RandomNumberParams {
    /// Lower bound, inclusive.
    #[schemars(description = "Minimum value, inclusive (default: 1)")]
    #[serde(default = "default_min_value")]
    pub min_value: i64,

    /// Upper bound, inclusive.
    #[schemars(description = "Maximum value, inclusive (default: 100)")]
    #[serde(default = "default_max_val")]
    pub max_val: i64,
}

impl Default for RandomNumberParams {
    fn default() -> Self {
        Self {
            min_value: default_min_value(),
            max_val: default_max_val(),
        }
    }
}

/// Random number tool - draws a uniformly distributed integer.
pub struct RandomNumberTool;

impl RandomNumberTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "random_number";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Generate a random integer between min_value and max_val, both inclusive.";

    pub fn execute(params: &RandomNumberParams) -> CallToolResult {
        info!(
            "Random number tool called: [{}, {}]",
            params.min_value, params.max_val
        );

        if params.min_value > params.max_val {
            return error_result(&format!(
                "min_value ({}) must not be greater than max_val ({})",
                params.min_value, params.max_val
            ));
        }

        let value = fastrand::i64(params.min_value..=params.max_val);
        success_result(value.to_string())
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let params: RandomNumberParams = http_params(arguments)?;
        http_response(&Self::execute(&params))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<RandomNumberParams>(),
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
                let params: RandomNumberParams = route_params(args)?;
                Ok(Self::execute(&params))
            }
            .boxed()
        })
    }
}
