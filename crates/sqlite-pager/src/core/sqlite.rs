use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rusqlite::{
    types::{Value, ValueRef},
    Connection, OpenFlags,
};

use crate::{
    core::{cursor::RowSource, types::DbRow, types::FetchMode},
    error::{AppError, AppResult},
};

pub fn open_conn(path: &Path, busy_timeout_ms: u64) -> AppResult<Connection> {
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_URI;
    let conn = Connection::open_with_flags(path, flags).map_err(|source| AppError::DbOpenFailed {
        path: path.to_path_buf(),
        source,
    })?;
    let _ = conn.busy_timeout(std::time::Duration::from_millis(busy_timeout_ms));
    Ok(conn)
}

pub fn is_sql_readonly(conn: &Connection, sql: &str) -> AppResult<bool> {
    let stmt = conn.prepare(sql)?;
    Ok(stmt.readonly())
}

/// Rows fetched per query when the caller does not pick a window.
pub const DEFAULT_WINDOW: usize = 256;

/// Rows of a read-only query, addressed by absolute index.
///
/// Rows are read in windows: a fetch outside the buffered window runs one
/// `LIMIT ? OFFSET ?` query starting at the requested index, and the
/// following sequential fetches are served from that buffer. Queries need a
/// deterministic order for pages to be stable.
#[derive(Debug)]
pub struct SqliteRows<'c> {
    conn: &'c Connection,
    count_sql: String,
    window_sql: String,
    columns: Vec<String>,
    window: usize,
    // absolute index of buffer[0]
    start: usize,
    buffer: Vec<Vec<Value>>,
}

impl<'c> SqliteRows<'c> {
    pub fn new(conn: &'c Connection, sql: &str) -> AppResult<Self> {
        let sql = sql.trim().trim_end_matches(';');
        if !is_sql_readonly(conn, sql)? {
            return Err(AppError::NotReadonly);
        }
        let columns = conn
            .prepare(sql)?
            .column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        Ok(Self {
            conn,
            count_sql: format!("SELECT COUNT(*) FROM ({sql})"),
            window_sql: format!("SELECT * FROM ({sql}) LIMIT ?1 OFFSET ?2"),
            columns,
            window: DEFAULT_WINDOW,
            start: 0,
            buffer: Vec::new(),
        })
    }

    /// Reads `window` rows per query; a window of one page size serves a
    /// whole page from a single statement.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window.max(1);
        self
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    fn buffered(&self, index: usize) -> Option<&[Value]> {
        let i = index.checked_sub(self.start)?;
        self.buffer.get(i).map(Vec::as_slice)
    }

    fn refill(&mut self, index: usize) -> AppResult<()> {
        let offset = to_sql_int(index)?;
        let window = to_sql_int(self.window)?;
        let width = self.columns.len();
        let conn = self.conn;
        let mut stmt = conn.prepare_cached(&self.window_sql)?;
        let rows = stmt
            .query_map([window, offset], |r| {
                (0..width).map(|i| r.get::<_, Value>(i)).collect::<rusqlite::Result<Vec<_>>>()
            })?
            .collect::<Result<Vec<_>, _>>()?;
        tracing::trace!(offset = index, fetched = rows.len(), "window read");
        self.start = index;
        self.buffer = rows;
        Ok(())
    }

    fn convert(&self, values: &[Value], mode: FetchMode) -> DbRow {
        match mode {
            FetchMode::Ordered => {
                DbRow::Ordered(values.iter().map(|v| value_to_json(v.into())).collect())
            }
            FetchMode::Default | FetchMode::Assoc => DbRow::Assoc(
                self.columns
                    .iter()
                    .cloned()
                    .zip(values.iter().map(|v| value_to_json(v.into())))
                    .collect(),
            ),
        }
    }
}

impl RowSource for SqliteRows<'_> {
    type Row = DbRow;

    fn row_count(&mut self) -> AppResult<usize> {
        let n: i64 = self.conn.query_row(&self.count_sql, [], |r| r.get(0))?;
        usize::try_from(n).map_err(|_| AppError::Internal(format!("negative row count: {n}")))
    }

    fn fetch_row(&mut self, index: usize, mode: FetchMode) -> AppResult<Option<DbRow>> {
        if self.buffered(index).is_none() {
            self.refill(index)?;
        }
        Ok(self.buffered(index).map(|values| self.convert(values, mode)))
    }

    fn fetch_row_into(&mut self, buf: &mut DbRow, index: usize, mode: FetchMode) -> AppResult<bool> {
        match self.fetch_row(index, mode)? {
            Some(row) => {
                *buf = row;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

fn to_sql_int(n: usize) -> AppResult<i64> {
    i64::try_from(n).map_err(|_| AppError::Internal(format!("row index out of range: {n}")))
}

fn value_to_json(v: ValueRef<'_>) -> serde_json::Value {
    match v {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Integer(x) => serde_json::Value::from(x),
        ValueRef::Real(x) => serde_json::Value::from(x),
        ValueRef::Text(t) => serde_json::Value::from(String::from_utf8_lossy(t).to_string()),
        ValueRef::Blob(b) => serde_json::json!({
            "$type": "blob",
            "base64": STANDARD.encode(b),
            "size": b.len()
        }),
    }
}
