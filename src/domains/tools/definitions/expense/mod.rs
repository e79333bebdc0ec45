//! Expense tools backed by the SQLite store.

pub mod add_expense;
pub mod envelope;
pub mod list_expenses;
pub mod summarize;

pub use add_expense::{AddExpenseParams, AddExpenseTool};
pub use envelope::{ErrorEnvelope, ExpenseAdded, Status, ToolOutcome};
pub use list_expenses::{ListExpensesParams, ListExpensesTool};
pub use summarize::{SummarizeParams, SummarizeTool};
