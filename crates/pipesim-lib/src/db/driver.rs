use std::path::PathBuf;

use rusqlite::Connection;
use tracing::debug;

use super::connection::{open_db, open_db_in_memory};

/// Where the hand-off store lives.
///
/// `InMemory` holds an anchor connection so the shared-cache database
/// outlives the individual connections handed out by [`Self::open`].
pub enum DatabaseDriver {
    File(PathBuf),
    InMemory { name: String, _anchor: Connection },
}

impl DatabaseDriver {
    #[must_use]
    pub fn file(path: PathBuf) -> Self {
        Self::File(path)
    }

    /// Named in-memory store; connections opened later share its data.
    pub fn in_memory(name: &str) -> anyhow::Result<Self> {
        let anchor = open_db_in_memory(name)?;
        Ok(Self::InMemory {
            name: name.to_string(),
            _anchor: anchor,
        })
    }

    /// Open a new connection with the schema applied.
    pub fn open(&self) -> anyhow::Result<Connection> {
        debug!(driver = self.describe(), "opening hand-off store");
        match self {
            Self::File(path) => open_db(path),
            Self::InMemory { name, .. } => open_db_in_memory(name),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::InMemory { name, .. } => format!("memory:{name}"),
        }
    }

    /// Whether a store already exists. A file store exists once it has been
    /// opened at least once; an in-memory store always exists.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        match self {
            Self::File(path) => path.exists(),
            Self::InMemory { .. } => true,
        }
    }
}
