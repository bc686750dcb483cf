use crate::errors::StoreError;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
#[cfg(test)]
use serde::de::DeserializeOwned;

/// Insert pre-serialized JSON bodies into `collection` in one transaction.
/// Returns the number of rows written.
pub fn insert_documents(
    conn: &mut Connection,
    collection: &str,
    bodies: &[String],
    now: NaiveDateTime,
) -> Result<usize, StoreError> {
    let tx = conn.transaction()?;

    let mut inserted = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO documents (collection, body, inserted_at) VALUES (?1, ?2, ?3)",
        )?;
        for body in bodies {
            inserted += stmt.execute(params![collection, body, now])?;
        }
    }

    tx.commit()?;
    Ok(inserted)
}

#[cfg(test)]
pub fn count_documents(conn: &Connection, collection: &str) -> Result<i64, StoreError> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM documents WHERE collection = ?1",
        params![collection],
        |row| row.get(0),
    )?;
    Ok(n)
}

/// Documents of `collection` in insertion order.
#[cfg(test)]
pub fn load_documents<T: DeserializeOwned>(
    conn: &Connection,
    collection: &str,
) -> Result<Vec<T>, StoreError> {
    let mut stmt =
        conn.prepare("SELECT body FROM documents WHERE collection = ?1 ORDER BY id")?;

    let rows = stmt.query_map(params![collection], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(serde_json::from_str(&r?)?);
    }
    Ok(out)
}
