use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

use crate::errors::StoreError;

const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

/// One SQLite connection, opened for a run and closed explicitly at its end.
pub struct Database {
    path: PathBuf,
    conn: Mutex<Option<Connection>>,
}

impl Database {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(&path).map_err(|source| StoreError::Open {
            path: path.display().to_string(),
            source,
        })?;

        debug!(path = %path.display(), "Opened database");

        Ok(Self {
            path,
            conn: Mutex::new(Some(conn)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Provides a mutable connection to the closure.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Connection) -> Result<T, StoreError>,
    {
        let mut slot = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let conn = slot.as_mut().ok_or(StoreError::Closed)?;
        f(conn)
    }

    /// Closes the connection. Calling it again is a no-op.
    pub fn close(&self) -> Result<(), StoreError> {
        let mut slot = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        if let Some(conn) = slot.take() {
            conn.close().map_err(|(_, e)| StoreError::Db(e))?;
            debug!(path = %self.path.display(), "Closed database");
        }
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.conn.lock().map(|slot| slot.is_some()).unwrap_or(false)
    }
}

/// Apply the bundled schema. Idempotent.
pub fn init_db(db: &Database) -> Result<(), StoreError> {
    db.with_conn(|conn| {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    })?;

    info!(path = %db.path().display(), "Database initialized");
    Ok(())
}
