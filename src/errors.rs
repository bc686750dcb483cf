// errors.rs
use thiserror::Error;

/// Errors from the persistence side: the SQLite document store and the
/// aggregate artifact file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Open DB failed ({path}): {source}")]
    Open {
        path: String,
        source: rusqlite::Error,
    },

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database connection is closed")]
    Closed,

    #[error("Database connection lock poisoned")]
    Poisoned,

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
