use tracing::debug;

use crate::context::PipesimContext;
use crate::db::driver::DatabaseDriver;
use crate::db::store::SqliteStore;

/// Everything a command handler needs besides its arguments.
pub struct Runtime {
    pub context: PipesimContext,
    pub db: DatabaseDriver,
}

impl Runtime {
    /// Open the hand-off store, creating it if needed.
    pub fn store(&self) -> anyhow::Result<SqliteStore> {
        Ok(SqliteStore::new(self.db.open()?))
    }

    /// Open the hand-off store only if it already exists. Read-only
    /// commands use this so they never create an empty store file.
    pub fn existing_store(&self) -> anyhow::Result<Option<SqliteStore>> {
        if !self.db.is_ready() {
            debug!("no hand-off store yet");
            return Ok(None);
        }
        self.store().map(Some)
    }
}
