//! Expense records and aggregates.

use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// A stored expense.
///
/// Everything but `id` comes straight from the caller; `id` is assigned by
/// SQLite on insert and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    /// Date in `YYYY-MM-DD` form. Not validated.
    pub date: String,
    pub amount: f64,
    pub category: String,
    pub subcategory: String,
    pub note: String,
}

/// An expense that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub date: String,
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub note: String,
}

/// Per-category aggregate produced by a summary query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub total_amount: f64,
    pub count: i64,
}

impl Expense {
    /// Column list matching [`Expense::from_row`].
    pub(crate) const COLUMNS: &'static str = "id, date, amount, category, subcategory, note";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            date: row.get(1)?,
            amount: row.get(2)?,
            category: row.get(3)?,
            // Columns are nullable in the schema
            subcategory: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            note: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        })
    }
}

impl NewExpense {
    /// Create an expense with empty subcategory and note.
    pub fn new(date: impl Into<String>, amount: f64, category: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            amount,
            category: category.into(),
            subcategory: String::new(),
            note: String::new(),
        }
    }

    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = subcategory.into();
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }
}

impl CategorySummary {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            category: row.get(0)?,
            total_amount: row.get(1)?,
            count: row.get(2)?,
        })
    }
}
