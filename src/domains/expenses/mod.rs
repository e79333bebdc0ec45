//! Expenses domain module.
//!
//! Persistence and queries for the single `expenses` table:
//!
//! - `model.rs` - expense records and category aggregates
//! - `store.rs` - schema initialization and the three queries
//! - `error.rs` - storage error types

mod error;
mod model;
mod store;

pub use error::{StorageError, StorageResult};
pub use model::{CategorySummary, Expense, NewExpense};
pub use store::{ExpenseStore, run_blocking};
