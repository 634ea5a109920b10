use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const SCHEMA_VERSION: i32 = 1;

/// Durable key/value store shared by every client process on the machine.
///
/// Writes from one process become visible to the others on their next read,
/// and `data_version` tells a reader whether anyone else committed since it
/// last looked.
pub struct LocalStore {
    conn: Mutex<Connection>,
}

impl LocalStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        let conn = Connection::open(path).context("Failed to open local storage")?;
        let store = LocalStore {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("Local storage connection poisoned"))
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.lock()?;
        let version: i32 = conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .unwrap_or(0);

        if version < SCHEMA_VERSION {
            conn.execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS entries (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );
                "#,
            )?;
            conn.execute_batch(&format!("PRAGMA user_version = {}", SCHEMA_VERSION))?;
        }

        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.lock()?;
        let value = conn
            .query_row("SELECT value FROM entries WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.set_all(&[(key, value)])
    }

    /// Write several entries in one transaction: either all land or none do.
    pub fn set_all(&self, entries: &[(&str, &str)]) -> Result<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let now = Utc::now().to_rfc3339();
        for (key, value) in entries {
            tx.execute(
                "INSERT INTO entries (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, now],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.remove_all(&[key])? > 0)
    }

    /// Delete several entries in one transaction. Returns how many existed.
    pub fn remove_all(&self, keys: &[&str]) -> Result<usize> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let mut removed = 0;
        for key in keys {
            removed += tx.execute("DELETE FROM entries WHERE key = ?1", [key])?;
        }
        tx.commit()?;
        Ok(removed)
    }

    pub fn keys(&self) -> Result<Vec<String>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT key FROM entries ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(keys)
    }

    /// Changes whenever another connection commits to the file.
    pub fn data_version(&self) -> Result<i64> {
        let conn = self.lock()?;
        let version = conn.query_row("PRAGMA data_version", [], |row| row.get(0))?;
        Ok(version)
    }
}
