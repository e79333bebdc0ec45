//! Domains module containing business logic organized by bounded contexts.
//!
//! - **expenses**: the SQLite-backed expense store
//! - **tools**: MCP tools callable by clients
//! - **resources**: read-only JSON resources

pub mod expenses;
pub mod resources;
pub mod tools;
