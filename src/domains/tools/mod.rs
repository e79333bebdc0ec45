//! Tools domain module.
//!
//! Tools are the functions MCP clients can call.
//!
//! ## Architecture
//!
//! - `definitions/expense/` - `add_expense`, `list_expenses`, `summarize`
//! - `definitions/utility/` - `add`, `random_number`
//! - `router.rs` - rmcp ToolRouter for STDIO/TCP transport
//! - `registry.rs` - tool names and HTTP dispatch
//! - `error.rs` - dispatch error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/`
//! 2. Define params, execute(), http_handler(), to_tool() and create_route()
//! 3. Export in `definitions/mod.rs`
//! 4. Add the route in `router.rs` and the name/dispatch arm in `registry.rs`

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
