//! Embedded adapter: single-file SQLite via `rusqlite`.
//!
//! The backend value only carries the file path; every scope opens a
//! fresh connection with a busy timeout, so concurrent handles contend on
//! SQLite's own writer serialization instead of a shared connection.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{Connection, Transaction};

use crate::error::Result;
use crate::storage::backend::Scope;
use crate::storage::value::SqlValue;

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection parameters for the embedded backend.
#[derive(Debug, Clone)]
pub struct SqliteBackend {
    path: PathBuf,
}

impl SqliteBackend {
    /// A backend for the database file at `path` (created on first open).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The database file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }

    /// Run `f` inside a transaction on a fresh connection.
    ///
    /// # Errors
    ///
    /// Returns connection/commit errors, or whatever `f` returns (the
    /// transaction rolls back on drop in that case).
    pub fn with_scope<T>(&self, f: impl FnOnce(&mut Scope<'_, '_>) -> Result<T>) -> Result<T> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let result = f(&mut Scope::Sqlite(&tx))?;
        tx.commit()?;
        Ok(result)
    }
}

fn param_refs(params: &[SqlValue]) -> Vec<&dyn rusqlite::ToSql> {
    params.iter().map(|p| p as &dyn rusqlite::ToSql).collect()
}

pub(crate) fn execute(tx: &Transaction<'_>, sql: &str, params: &[SqlValue]) -> Result<u64> {
    let changed = tx.execute(sql, param_refs(params).as_slice())?;
    Ok(changed as u64)
}

pub(crate) fn execute_many(
    tx: &Transaction<'_>,
    sql: &str,
    batches: &[Vec<SqlValue>],
) -> Result<()> {
    let mut stmt = tx.prepare(sql)?;
    for batch in batches {
        stmt.execute(param_refs(batch).as_slice())?;
    }
    Ok(())
}

pub(crate) fn fetch_all(
    tx: &Transaction<'_>,
    sql: &str,
    params: &[SqlValue],
) -> Result<Vec<Vec<SqlValue>>> {
    let mut stmt = tx.prepare(sql)?;
    let column_count = stmt.column_count();
    let mut rows = stmt.query(param_refs(params).as_slice())?;

    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let mut cells = Vec::with_capacity(column_count);
        for i in 0..column_count {
            cells.push(SqlValue::from(row.get::<_, rusqlite::types::Value>(i)?));
        }
        out.push(cells);
    }
    Ok(out)
}
