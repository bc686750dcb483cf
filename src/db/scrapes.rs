use crate::errors::StoreError;
use rusqlite::{params, Connection};
#[cfg(test)]
use rusqlite::OptionalExtension;

/// One pipeline run as recorded in `scrape_runs`.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeRun {
    pub id: i64,
    pub search_url: String,
    pub started_at: i64,
    pub finished_at: Option<i64>,
    pub pages_requested: Option<i64>,
    pub pages_completed: Option<i64>,
    pub listings_seen: Option<i64>,
    pub success: bool,
    pub error_message: Option<String>,
}

/// What the run ledger records when a run ends.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub pages_requested: u32,
    pub pages_completed: u32,
    pub listings_seen: usize,
    pub success: bool,
    pub error: Option<String>,
}

pub fn start_scrape_run(conn: &Connection, search_url: &str, now: i64) -> Result<i64, StoreError> {
    conn.execute(
        "INSERT INTO scrape_runs (search_url, started_at, success) VALUES (?, ?, 0)",
        params![search_url, now],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn end_scrape_run(
    conn: &Connection,
    run_id: i64,
    now: i64,
    summary: &RunSummary,
) -> Result<(), StoreError> {
    conn.execute(
        "UPDATE scrape_runs SET finished_at = ?, pages_requested = ?, pages_completed = ?, listings_seen = ?, success = ?, error_message = ? WHERE id = ?",
        params![
            now,
            summary.pages_requested,
            summary.pages_completed,
            summary.listings_seen,
            summary.success,
            summary.error,
            run_id
        ],
    )?;
    Ok(())
}

#[cfg(test)]
pub fn get_scrape_run(conn: &Connection, run_id: i64) -> Result<Option<ScrapeRun>, StoreError> {
    let run = conn
        .query_row(
            "SELECT id, search_url, started_at, finished_at, pages_requested, pages_completed, listings_seen, success, error_message FROM scrape_runs WHERE id = ?",
            params![run_id],
            |row| {
                Ok(ScrapeRun {
                    id: row.get(0)?,
                    search_url: row.get(1)?,
                    started_at: row.get(2)?,
                    finished_at: row.get(3)?,
                    pages_requested: row.get(4)?,
                    pages_completed: row.get(5)?,
                    listings_seen: row.get(6)?,
                    success: row.get(7)?,
                    error_message: row.get(8)?,
                })
            },
        )
        .optional()?;
    Ok(run)
}
