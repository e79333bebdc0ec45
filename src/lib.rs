//! Expense Tracker MCP Server Library
//!
//! A Model Context Protocol (MCP) server that records expenses in a local
//! SQLite database and exposes them through tools and resources.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **expenses**: the expense table and its queries
//!   - **tools**: MCP tools that can be executed by clients
//!   - **resources**: read-only JSON resources
//!
//! # Example
//!
//! ```rust,no_run
//! use expense_mcp_server::{Config, McpServer};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::bootstrap(config)?;
//!     // Start a transport with the server...
//!     # let _ = server;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
