//! Storage error types.

use thiserror::Error;

/// A specialized Result type for expense storage operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Errors that can occur while talking to the expense database.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The SQLite engine reported a failure (I/O, malformed query, type mismatch).
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The database location could not be prepared.
    #[error("cannot prepare database directory {path}: {source}")]
    Directory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The blocking task running the query was cancelled before it finished.
    #[error("storage task interrupted: {0}")]
    Interrupted(String),
}

impl StorageError {
    /// Create a directory preparation error.
    pub fn directory(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Directory {
            path: path.into(),
            source,
        }
    }
}
