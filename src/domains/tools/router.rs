//! Tool Router - builds the rmcp ToolRouter.
//!
//! Used by the STDIO/TCP transports; each tool creates its own route.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::domains::expenses::ExpenseStore;

use super::definitions::{AddExpenseTool, AddTool, ListExpensesTool, RandomNumberTool, SummarizeTool};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(store: Arc<ExpenseStore>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(AddExpenseTool::create_route(store.clone()))
        .with_route(ListExpensesTool::create_route(store.clone()))
        .with_route(SummarizeTool::create_route(store))
        .with_route(AddTool::create_route())
        .with_route(RandomNumberTool::create_route())
}
