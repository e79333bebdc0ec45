//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file.

pub mod common;
pub mod expense;
pub mod utility;

pub use expense::{AddExpenseTool, ListExpensesTool, SummarizeTool};
pub use utility::{AddTool, RandomNumberTool};
