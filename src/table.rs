//! SQLite message table
//!
//! The table has two columns, `id` (the message code) and `item` (the raw
//! message). Loading reads the whole table with a single bulk query.

use crate::config::validate_table_name;
use crate::error::LoadError;
use crate::loader::{Loader, Messages};
use crate::Result;
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OpenFlags, Row};
use std::path::{Path, PathBuf};

/// A message table inside a SQLite database file
#[derive(Debug, Clone)]
pub struct MessageTable {
    path: PathBuf,
    table: String,
}

impl MessageTable {
    /// Refer to `table` in the database at `path`
    ///
    /// Nothing is opened yet. Fails if `table` is not a plain identifier.
    pub fn new(path: impl Into<PathBuf>, table: impl Into<String>) -> Result<Self> {
        let table = table.into();
        validate_table_name(&table)?;
        Ok(Self {
            path: path.into(),
            table,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Create the database file and table if they are missing
    pub fn create_if_missing(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        tracing::info!(path = %self.path.display(), table = %self.table, "Initializing message table");

        let conn = Connection::open(&self.path)?;
        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id TEXT PRIMARY KEY,
                item TEXT NOT NULL
            );",
            self.table
        ))?;
        Ok(())
    }

    /// Insert or replace one message
    pub fn put(&self, id: &str, item: &str) -> Result<()> {
        let conn = Connection::open(&self.path)?;
        conn.execute(
            &format!("INSERT OR REPLACE INTO {} (id, item) VALUES (?1, ?2)", self.table),
            params![id, item],
        )?;
        tracing::debug!(id, table = %self.table, "Stored message");
        Ok(())
    }

    /// Delete one message, returning whether it existed
    pub fn remove(&self, id: &str) -> Result<bool> {
        let conn = Connection::open(&self.path)?;
        let deleted = conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1", self.table),
            params![id],
        )?;
        Ok(deleted > 0)
    }

    fn load_all(&self) -> std::result::Result<Messages, LoadError> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        let mut stmt = conn.prepare(&format!("SELECT id, item FROM {}", self.table))?;
        let mut rows = stmt.query([])?;

        let mut messages = Messages::new();
        let mut index = 0;
        while let Some(row) = rows.next()? {
            let id = column_text(row, 0, index, "id")?;
            let item = column_text(row, 1, index, "item")?;
            messages.insert(id, item);
            index += 1;
        }

        Ok(messages)
    }
}

impl Loader for MessageTable {
    fn load(&self) -> std::result::Result<Messages, LoadError> {
        tracing::debug!(table = %self.table, "Querying message table");
        self.load_all()
    }
}

/// Read a column as text; numbers are accepted and rendered as text
fn column_text(
    row: &Row<'_>,
    column: usize,
    index: usize,
    name: &str,
) -> std::result::Result<String, LoadError> {
    let invalid = |reason: String| LoadError::InvalidRow { row: index, reason };

    match row.get_ref(column)? {
        ValueRef::Text(bytes) => String::from_utf8(bytes.to_vec())
            .map_err(|_| invalid(format!("{} is not valid UTF-8", name))),
        ValueRef::Integer(i) => Ok(i.to_string()),
        ValueRef::Real(f) => Ok(f.to_string()),
        ValueRef::Null => Err(invalid(format!("{} is NULL", name))),
        ValueRef::Blob(_) => Err(invalid(format!("{} is a blob", name))),
    }
}
