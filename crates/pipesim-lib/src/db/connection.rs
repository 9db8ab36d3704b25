use std::path::Path;

use anyhow::Context;
use rusqlite::{Connection, OpenFlags};

use super::schema::apply_migrations;

/// Open a file-backed `SQLite` store, creating parent directories and
/// applying the schema.
pub fn open_db(path: &Path) -> anyhow::Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut conn = Connection::open(path)
        .with_context(|| format!("Failed to open database: {}", path.display()))?;
    init_connection(&mut conn)?;
    Ok(conn)
}

/// Open a named in-memory store.
///
/// Shared-cache mode lets every connection opened with the same `name`
/// see the same data while at least one of them stays open.
pub fn open_db_in_memory(name: &str) -> anyhow::Result<Connection> {
    let uri = format!("file:{name}?mode=memory&cache=shared");
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_SHARED_CACHE
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;

    let mut conn = Connection::open_with_flags(uri, flags)
        .with_context(|| format!("Failed to open in-memory database: {name}"))?;
    init_connection(&mut conn)?;
    Ok(conn)
}

fn init_connection(conn: &mut Connection) -> anyhow::Result<()> {
    conn.pragma_update(None, "journal_mode", "WAL")
        .context("Failed to enable WAL mode")?;
    conn.pragma_update(None, "busy_timeout", 5000)
        .context("Failed to set busy_timeout")?;
    apply_migrations(conn)
}

#[cfg(test)]
mod tests {
    use rusqlite::params;

    use super::*;

    #[test]
    fn open_db_creates_file_and_parents() {
        let tmp = tempfile::tempdir().unwrap();
        let db_path = tmp.path().join("nested").join("pipesim.db");
        let conn = open_db(&db_path).unwrap();
        assert!(db_path.exists());
        drop(conn);
    }

    #[test]
    fn in_memory_shared_cache_persists() {
        let conn1 = open_db_in_memory("conn_shared").unwrap();
        conn1
            .execute(
                "INSERT INTO handoff (key, value) VALUES (?1, ?2)",
                params!["rag-best", "Lunch is served at 12:00 PM."],
            )
            .unwrap();

        let conn2 = open_db_in_memory("conn_shared").unwrap();
        let val: String = conn2
            .query_row(
                "SELECT value FROM handoff WHERE key = ?1",
                params!["rag-best"],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(val, "Lunch is served at 12:00 PM.");
    }

    #[test]
    fn wal_mode_is_active() {
        let tmp = tempfile::tempdir().unwrap();
        let conn = open_db(&tmp.path().join("wal.db")).unwrap();
        let mode: String = conn
            .pragma_query_value(None, "journal_mode", |row| row.get(0))
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }

    #[test]
    fn busy_timeout_is_set() {
        let tmp = tempfile::tempdir().unwrap();
        let conn = open_db(&tmp.path().join("timeout.db")).unwrap();
        let timeout: i64 = conn
            .pragma_query_value(None, "busy_timeout", |row| row.get(0))
            .unwrap();
        assert_eq!(timeout, 5000);
    }
}
