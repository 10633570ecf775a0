// src/load/mod.rs

use rusqlite::{params_from_iter, types::Value, Connection};
use std::{fs, path::Path, time::Instant};
use tracing::{debug, info, instrument};

use crate::error::{EtlError, Result};

/// One column of a loaded table (the `id` key is implicit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub sql_type: &'static str,
}

impl Column {
    pub const fn new(name: &'static str, sql_type: &'static str) -> Self {
        Self { name, sql_type }
    }
}

/// A record type that maps onto one SQLite table.
/// - `TABLE` / `COLUMNS` drive DDL and the INSERT column list.
/// - `to_values` must yield one value per column, in `COLUMNS` order.
pub trait TableRecord {
    const TABLE: &'static str;
    const COLUMNS: &'static [Column];
    fn to_values(&self) -> Vec<Value>;
}

/// Blank strings bind as NULL so NOT NULL columns reject them.
pub fn text(s: &str) -> Value {
    if s.is_empty() {
        Value::Null
    } else {
        Value::Text(s.to_string())
    }
}

pub fn integer(n: Option<i64>) -> Value {
    n.map_or(Value::Null, Value::Integer)
}

/// Open (or create) the SQLite file at `path`, creating its parent directory.
pub fn open_database(path: impl AsRef<Path>) -> Result<Connection> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| EtlError::io(parent, e))?;
    }
    info!(path = %path.display(), "Initializing SQLite database connection");
    Connection::open(path).map_err(|e| EtlError::persistence(path.display().to_string(), e))
}

fn create_table_sql<R: TableRecord>() -> String {
    let cols: Vec<String> = R::COLUMNS
        .iter()
        .map(|c| format!("\"{}\" {} NOT NULL", c.name, c.sql_type))
        .collect();
    format!(
        "CREATE TABLE \"{}\" (id INTEGER PRIMARY KEY AUTOINCREMENT, {})",
        R::TABLE,
        cols.join(", ")
    )
}

fn insert_sql<R: TableRecord>(rows: usize) -> String {
    let names: Vec<String> = R::COLUMNS
        .iter()
        .map(|c| format!("\"{}\"", c.name))
        .collect();
    let placeholders = format!("({})", vec!["?"; R::COLUMNS.len()].join(", "));
    format!(
        "INSERT INTO \"{}\" ({}) VALUES {}",
        R::TABLE,
        names.join(", "),
        vec![placeholders; rows].join(", ")
    )
}

/// Upper bound on `?` parameters in one SQLite statement.
pub const SQLITE_MAX_PARAMS: usize = 32_766;

/// Rows per INSERT: `requested`, clamped to 1 and to what fits in one statement.
pub fn effective_batch_size<R: TableRecord>(requested: usize) -> usize {
    let max_rows = (SQLITE_MAX_PARAMS / R::COLUMNS.len().max(1)).max(1);
    requested.clamp(1, max_rows)
}

pub fn drop_table<R: TableRecord>(conn: &Connection) -> Result<()> {
    conn.execute_batch(&format!("DROP TABLE IF EXISTS \"{}\"", R::TABLE))
        .map_err(|e| EtlError::persistence(R::TABLE, e))
}

/// Drop `R::TABLE` if present and create it empty.
pub fn recreate_table<R: TableRecord>(conn: &Connection) -> Result<()> {
    drop_table::<R>(conn)?;
    conn.execute_batch(&create_table_sql::<R>())
        .map_err(|e| EtlError::persistence(R::TABLE, e))?;
    debug!(table = R::TABLE, "table recreated");
    Ok(())
}

/// Insert `rows` in order, one multi-row INSERT per chunk of `requested` rows
/// (capped by `effective_batch_size`).
///
/// Each statement commits on its own, so a failing batch leaves the earlier
/// ones in place.
pub fn batch_insert<R: TableRecord>(conn: &Connection, rows: &[R], requested: usize) -> Result<usize> {
    let batch_size = effective_batch_size::<R>(requested);
    if batch_size < requested {
        debug!(table = R::TABLE, requested, batch_size, "batch size capped");
    }
    let mut inserted = 0usize;

    for chunk in rows.chunks(batch_size) {
        let sql = insert_sql::<R>(chunk.len());
        let mut stmt = conn
            .prepare_cached(&sql)
            .map_err(|e| EtlError::persistence(R::TABLE, e))?;
        let values = chunk.iter().flat_map(|r| r.to_values());
        inserted += stmt
            .execute(params_from_iter(values))
            .map_err(|e| EtlError::persistence(R::TABLE, e))?;
        debug!(table = R::TABLE, inserted, "batch inserted");
    }

    Ok(inserted)
}

/// Recreate the table for `R` and bulk-insert `rows`.
#[instrument(level = "info", skip(conn, rows), fields(table = R::TABLE, rows = rows.len()))]
pub fn load_table<R: TableRecord>(conn: &Connection, rows: &[R], batch_size: usize) -> Result<usize> {
    let start = Instant::now();
    recreate_table::<R>(conn)?;
    let inserted = batch_insert(conn, rows, batch_size)?;
    info!(inserted, elapsed = ?start.elapsed(), "table loaded");
    Ok(inserted)
}
