use anyhow::Context;
use rusqlite::{Connection, params};

/// Insert or replace the value stored under `key`.
pub fn set_value(conn: &Connection, key: &str, value: &str) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO handoff (key, value, updated_at)
         VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET
           value = excluded.value,
           updated_at = datetime('now')",
        params![key, value],
    )
    .with_context(|| format!("Failed to store hand-off value for {key}"))?;
    Ok(())
}

/// Value stored under `key`, or `None` if it was never set.
pub fn get_value(conn: &Connection, key: &str) -> anyhow::Result<Option<String>> {
    let mut stmt = conn
        .prepare("SELECT value FROM handoff WHERE key = ?1")
        .context("Failed to prepare get_value query")?;

    let value = stmt
        .query_row(params![key], |row| row.get(0))
        .optional()
        .with_context(|| format!("Failed to read hand-off value for {key}"))?;
    Ok(value)
}

trait OptionalExt<T> {
    fn optional(self) -> rusqlite::Result<Option<T>>;
}

impl<T> OptionalExt<T> for rusqlite::Result<T> {
    fn optional(self) -> rusqlite::Result<Option<T>> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
