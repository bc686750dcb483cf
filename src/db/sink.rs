use crate::db::connection::Database;
use crate::db::documents::insert_documents;
use crate::db::scrapes::{end_scrape_run, start_scrape_run, RunSummary};
use crate::errors::StoreError;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

/// Where a run's results go: raw records into a document collection, the
/// aggregate as a file, plus a ledger row per run.
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn bulk_insert(&self, collection: &str, documents: &[Value]) -> Result<usize, StoreError>;

    async fn write_artifact(&self, path: &Path, payload: &str) -> Result<(), StoreError>;

    async fn start_run(&self, search_url: &str) -> Result<i64, StoreError>;

    async fn finish_run(&self, run_id: i64, summary: &RunSummary) -> Result<(), StoreError>;

    async fn close(&self) -> Result<(), StoreError>;
}

/// SQLite-backed sink. Statements run on the blocking pool.
pub struct SqliteSink {
    db: Arc<Database>,
}

impl SqliteSink {
    pub fn new(db: Database) -> Self {
        Self { db: Arc::new(db) }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    async fn blocking<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Database) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || f(&db)).await?
    }
}

#[async_trait]
impl ResultSink for SqliteSink {
    async fn bulk_insert(&self, collection: &str, documents: &[Value]) -> Result<usize, StoreError> {
        let bodies: Vec<String> = documents.iter().map(Value::to_string).collect();
        let collection = collection.to_string();
        let now = Utc::now().naive_utc();

        self.blocking(move |db| {
            db.with_conn(|conn| insert_documents(conn, &collection, &bodies, now))
        })
        .await
    }

    async fn write_artifact(&self, path: &Path, payload: &str) -> Result<(), StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, payload).await?;
        Ok(())
    }

    async fn start_run(&self, search_url: &str) -> Result<i64, StoreError> {
        let search_url = search_url.to_string();
        let now = Utc::now().timestamp();

        self.blocking(move |db| db.with_conn(|conn| start_scrape_run(conn, &search_url, now)))
            .await
    }

    async fn finish_run(&self, run_id: i64, summary: &RunSummary) -> Result<(), StoreError> {
        let summary = summary.clone();
        let now = Utc::now().timestamp();

        self.blocking(move |db| db.with_conn(|conn| end_scrape_run(conn, run_id, now, &summary)))
            .await
    }

    async fn close(&self) -> Result<(), StoreError> {
        self.blocking(|db| db.close()).await
    }
}
