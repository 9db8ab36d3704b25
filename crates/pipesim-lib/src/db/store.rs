use rusqlite::Connection;

use crate::handoff::KeyValueStore;

use super::queries::{get_value, set_value};

/// [`KeyValueStore`] backed by the `handoff` table.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    #[must_use]
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        get_value(&self.conn, key)
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        set_value(&self.conn, key, value)
    }
}
