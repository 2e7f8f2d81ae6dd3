//! Implements the `Backend` trait on top of an embedded SQLite database.

use crate::store::Backend;
use crate::Result;
use anyhow::{bail, Context};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// The schema version this code reads and writes, tracked in `PRAGMA user_version`.
const SCHEMA_VERSION: i32 = 1;

const CREATE_KV: &str = "CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
)";

/// Stores values as rows of a two-column `kv` table.
#[derive(Debug)]
pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    /// Opens, or creates, the SQLite database at `path` and brings its schema up to date.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .with_context(|| format!("Unable to open SQLite database at {}", path.display()))?;
        conn.busy_timeout(Duration::from_millis(250))
            .context("Unable to set SQLite busy timeout")?;
        Self::init(conn)
    }

    /// A database that lives only as long as this value.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Unable to open in-memory SQLite")?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        let version: i32 = conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .context("Unable to read the database schema version")?;
        if version > SCHEMA_VERSION {
            bail!(
                "Database schema version {version} is newer than the supported version \
                {SCHEMA_VERSION}. Is a newer version of flow available?"
            );
        }
        if version < SCHEMA_VERSION {
            debug!("Migrating database schema from version {version} to {SCHEMA_VERSION}");
            conn.execute_batch(&format!(
                "BEGIN;
                {CREATE_KV};
                PRAGMA user_version = {SCHEMA_VERSION};
                COMMIT;"
            ))
            .context("Unable to initialize the database schema")?;
        }
        Ok(Self { conn })
    }
}

impl Backend for SqliteBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .with_context(|| format!("Unable to read '{key}' from the database"))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .with_context(|| format!("Unable to write '{key}' to the database"))?;
        Ok(())
    }
}
