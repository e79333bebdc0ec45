//! SQLite-backed expense store.
//!
//! The store only remembers where the database lives. Every operation opens
//! its own connection and closes it before returning, so concurrent callers
//! never share a connection and SQLite's file locking is the only
//! coordination between them.

use rusqlite::{Connection, params};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::error::{StorageError, StorageResult};
use super::model::{CategorySummary, Expense, NewExpense};
use crate::core::config::StorageConfig;

const CREATE_EXPENSES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS expenses(
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT NOT NULL,
    amount REAL NOT NULL,
    category TEXT NOT NULL,
    subcategory TEXT DEFAULT '',
    note TEXT DEFAULT ''
)
"#;

const INSERT_EXPENSE: &str =
    "INSERT INTO expenses(date, amount, category, subcategory, note) VALUES (?1, ?2, ?3, ?4, ?5)";

/// Handle to the expense database.
#[derive(Debug, Clone)]
pub struct ExpenseStore {
    config: StorageConfig,
}

impl ExpenseStore {
    /// Create a store for the configured database file.
    ///
    /// Nothing is touched on disk until [`ExpenseStore::initialize`] runs.
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    /// Path of the underlying database file.
    pub fn path(&self) -> &Path {
        &self.config.db_path
    }

    fn connect(&self) -> StorageResult<Connection> {
        Ok(Connection::open(&self.config.db_path)?)
    }

    /// Make sure the database file and the `expenses` table exist.
    ///
    /// Safe to call on every start: an existing table and its rows are left
    /// untouched.
    #[instrument(skip(self), fields(path = %self.config.db_path.display()))]
    pub fn initialize(&self) -> StorageResult<()> {
        if let Some(parent) = self.config.db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StorageError::directory(parent.display().to_string(), e))?;
            }
        }

        let conn = self.connect()?;
        conn.execute_batch(CREATE_EXPENSES_TABLE)?;

        info!("Database initialized at: {}", self.config.db_path.display());
        Ok(())
    }

    /// Store a new expense and return its id.
    pub fn insert(&self, expense: &NewExpense) -> StorageResult<i64> {
        let conn = self.connect()?;
        conn.execute(
            INSERT_EXPENSE,
            params![
                expense.date,
                expense.amount,
                expense.category,
                expense.subcategory,
                expense.note,
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!(id, category = %expense.category, "Inserted expense");
        Ok(id)
    }

    /// All expenses with `start_date <= date <= end_date`, newest first.
    ///
    /// Dates are compared as strings. Ties on date are broken by id, highest
    /// first.
    pub fn list_range(&self, start_date: &str, end_date: &str) -> StorageResult<Vec<Expense>> {
        let conn = self.connect()?;
        let sql = format!(
            "SELECT {} FROM expenses \
             WHERE date BETWEEN ?1 AND ?2 \
             ORDER BY date DESC, id DESC",
            Expense::COLUMNS
        );

        let mut stmt = conn.prepare(&sql)?;
        let expenses = stmt
            .query_map(params![start_date, end_date], Expense::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        debug!(count = expenses.len(), "Listed expenses");
        Ok(expenses)
    }

    /// Totals per category for the date range, largest total first.
    ///
    /// With `category` set (and non-empty) only that category is aggregated.
    /// Categories without matching rows do not appear.
    pub fn summarize(
        &self,
        start_date: &str,
        end_date: &str,
        category: Option<&str>,
    ) -> StorageResult<Vec<CategorySummary>> {
        let category = category.filter(|c| !c.is_empty());

        let mut sql = String::from(
            "SELECT category, SUM(amount) AS total_amount, COUNT(*) AS count \
             FROM expenses \
             WHERE date BETWEEN ?1 AND ?2",
        );
        if category.is_some() {
            sql.push_str(" AND category = ?3");
        }
        sql.push_str(" GROUP BY category ORDER BY total_amount DESC, category ASC");

        let conn = self.connect()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = match category {
            Some(category) => stmt.query_map(
                params![start_date, end_date, category],
                CategorySummary::from_row,
            )?,
            None => stmt.query_map(params![start_date, end_date], CategorySummary::from_row)?,
        };
        let summaries = rows.collect::<rusqlite::Result<Vec<_>>>()?;

        debug!(groups = summaries.len(), "Summarized expenses");
        Ok(summaries)
    }
}

/// Run a store operation on the blocking thread pool.
///
/// A panic inside `op` is re-raised on the calling task instead of being
/// turned into a [`StorageError`].
pub async fn run_blocking<T, F>(store: &Arc<ExpenseStore>, op: F) -> StorageResult<T>
where
    T: Send + 'static,
    F: FnOnce(&ExpenseStore) -> StorageResult<T> + Send + 'static,
{
    let store = Arc::clone(store);
    match tokio::task::spawn_blocking(move || op(&store)).await {
        Ok(result) => result,
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(e) => Err(StorageError::Interrupted(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn test_store() -> (TempDir, ExpenseStore) {
        let dir = TempDir::new().unwrap();
        let store = ExpenseStore::new(StorageConfig::at(dir.path().join("expenses.db")));
        store.initialize().unwrap();
        (dir, store)
    }

    #[test]
    fn test_insert_then_list_round_trips_fields() {
        let (_dir, store) = test_store();
        let expense = NewExpense::new("2024-03-14", 7.25, "Food & Dining")
            .with_subcategory("Coffee")
            .with_note("flat white");

        let id = store.insert(&expense).unwrap();
        let listed = store.list_range("2024-03-01", "2024-03-31").unwrap();

        assert_eq!(
            listed,
            vec![Expense {
                id,
                date: "2024-03-14".to_string(),
                amount: 7.25,
                category: "Food & Dining".to_string(),
                subcategory: "Coffee".to_string(),
                note: "flat white".to_string(),
            }]
        );
    }

    #[test]
    fn test_ids_are_fresh() {
        let (_dir, store) = test_store();
        let first = store.insert(&NewExpense::new("2024-01-01", 1.0, "Other")).unwrap();
        let second = store.insert(&NewExpense::new("2024-01-01", 2.0, "Other")).unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let (_dir, store) = test_store();
        store.insert(&NewExpense::new("2024-01-01", 3.0, "Travel")).unwrap();

        store.initialize().unwrap();
        let reopened = ExpenseStore::new(StorageConfig::at(store.path()));
        reopened.initialize().unwrap();

        assert_eq!(reopened.list_range("2024-01-01", "2024-01-01").unwrap().len(), 1);
    }

    #[test]
    fn test_initialize_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("expenses.db");
        let store = ExpenseStore::new(StorageConfig::at(&path));

        store.initialize().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_initialize_fails_below_a_regular_file() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("plain");
        std::fs::write(&blocker, "not a directory").unwrap();

        let store = ExpenseStore::new(StorageConfig::at(blocker.join("expenses.db")));
        assert!(store.initialize().is_err());
    }

    #[test]
    fn test_list_orders_by_date_then_id_descending() {
        let (_dir, store) = test_store();
        let a = store.insert(&NewExpense::new("2024-01-05", 1.0, "Other")).unwrap();
        let b = store.insert(&NewExpense::new("2024-01-10", 2.0, "Other")).unwrap();
        let c = store.insert(&NewExpense::new("2024-01-05", 3.0, "Other")).unwrap();

        let ids: Vec<_> = store
            .list_range("2024-01-01", "2024-01-31")
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![b, c, a]);
    }

    #[test]
    fn test_list_range_bounds_are_inclusive() {
        let (_dir, store) = test_store();
        store.insert(&NewExpense::new("2024-01-01", 1.0, "Other")).unwrap();
        store.insert(&NewExpense::new("2024-01-31", 1.0, "Other")).unwrap();
        store.insert(&NewExpense::new("2024-02-01", 1.0, "Other")).unwrap();

        assert_eq!(store.list_range("2024-01-01", "2024-01-31").unwrap().len(), 2);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let (_dir, store) = test_store();
        store.insert(&NewExpense::new("2024-01-15", 1.0, "Other")).unwrap();

        assert!(store.list_range("2024-01-31", "2024-01-01").unwrap().is_empty());
        assert!(
            store
                .summarize("2024-01-31", "2024-01-01", None)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_documented_scenario() {
        let (_dir, store) = test_store();
        let food = store
            .insert(&NewExpense::new("2024-01-05", 12.50, "Food & Dining"))
            .unwrap();
        let transport = store
            .insert(&NewExpense::new("2024-01-10", 40.00, "Transportation"))
            .unwrap();

        let listed = store.list_range("2024-01-01", "2024-01-31").unwrap();
        assert_eq!(
            listed.iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![transport, food]
        );

        let summary = store.summarize("2024-01-01", "2024-01-31", None).unwrap();
        assert_eq!(
            summary,
            vec![
                CategorySummary {
                    category: "Transportation".to_string(),
                    total_amount: 40.0,
                    count: 1,
                },
                CategorySummary {
                    category: "Food & Dining".to_string(),
                    total_amount: 12.5,
                    count: 1,
                },
            ]
        );
    }

    #[test]
    fn test_summarize_matches_independent_aggregation() {
        let (_dir, store) = test_store();
        let rows = [
            ("2024-02-01", 10.0, "Shopping"),
            ("2024-02-03", 2.5, "Food & Dining"),
            ("2024-02-03", 4.0, "Shopping"),
            ("2024-02-10", 7.5, "Food & Dining"),
            ("2024-02-28", 100.0, "Travel"),
            ("2024-03-01", 50.0, "Shopping"),
            ("2024-01-31", 9.0, "Travel"),
        ];
        for (date, amount, category) in rows {
            store.insert(&NewExpense::new(date, amount, category)).unwrap();
        }

        let mut expected: BTreeMap<&str, (f64, i64)> = BTreeMap::new();
        for (date, amount, category) in rows {
            if ("2024-02-01"..="2024-02-29").contains(&date) {
                let entry = expected.entry(category).or_default();
                entry.0 += amount;
                entry.1 += 1;
            }
        }

        let summary = store.summarize("2024-02-01", "2024-02-29", None).unwrap();
        assert_eq!(summary.len(), expected.len());
        for row in &summary {
            let (total, count) = expected[row.category.as_str()];
            assert!((row.total_amount - total).abs() < 1e-9);
            assert_eq!(row.count, count);
        }
        let totals: Vec<_> = summary.iter().map(|s| s.total_amount).collect();
        assert!(totals.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_summarize_with_category_filter() {
        let (_dir, store) = test_store();
        store.insert(&NewExpense::new("2024-05-01", 3.0, "Healthcare")).unwrap();
        store.insert(&NewExpense::new("2024-05-02", 4.0, "Healthcare")).unwrap();
        store.insert(&NewExpense::new("2024-05-03", 9.0, "Education")).unwrap();

        let summary = store
            .summarize("2024-05-01", "2024-05-31", Some("Healthcare"))
            .unwrap();
        assert_eq!(
            summary,
            vec![CategorySummary {
                category: "Healthcare".to_string(),
                total_amount: 7.0,
                count: 2,
            }]
        );

        let missing = store
            .summarize("2024-05-01", "2024-05-31", Some("Business"))
            .unwrap();
        assert!(missing.is_empty());
    }

    #[test]
    fn test_summarize_empty_category_means_all() {
        let (_dir, store) = test_store();
        store.insert(&NewExpense::new("2024-05-01", 3.0, "Healthcare")).unwrap();
        store.insert(&NewExpense::new("2024-05-03", 9.0, "Education")).unwrap();

        let summary = store.summarize("2024-05-01", "2024-05-31", Some("")).unwrap();
        assert_eq!(summary.len(), 2);
    }

    #[test]
    fn test_query_without_table_fails() {
        let dir = TempDir::new().unwrap();
        let store = ExpenseStore::new(StorageConfig::at(dir.path().join("fresh.db")));
        assert!(store.list_range("2024-01-01", "2024-12-31").is_err());
    }

    #[tokio::test]
    async fn test_run_blocking_returns_operation_result() {
        let (_dir, store) = test_store();
        let store = Arc::new(store);

        let id = run_blocking(&store, |s| {
            s.insert(&NewExpense::new("2024-06-01", 5.0, "Entertainment"))
        })
        .await
        .unwrap();

        let listed = run_blocking(&store, |s| s.list_range("2024-06-01", "2024-06-01"))
            .await
            .unwrap();
        assert_eq!(listed[0].id, id);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_inserts_get_unique_ids() {
        let (_dir, store) = test_store();
        let store = Arc::new(store);

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    run_blocking(&store, move |s| {
                        s.insert(&NewExpense::new("2024-07-01", f64::from(i), "Shopping"))
                    })
                    .await
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 20);

        let listed = store.list_range("2024-07-01", "2024-07-01").unwrap();
        assert_eq!(listed.len(), 20);
    }
}
