//! DuckDB-backed query source
//!
//! Wraps any SELECT statement and pages through it with
//! `SELECT COUNT(*) FROM (<query>)` and `... LIMIT n OFFSET m`.
//! DuckDB can attach PostgreSQL, MySQL and SQLite databases, so the same
//! source works against those through `ATTACH`.

use crate::error::{Error, Result};
use crate::pagination::QuerySource;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, NaiveTime};
use duckdb::types::{TimeUnit, Value as DbValue};
use duckdb::Connection;
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// A SQL query executed by DuckDB, exposed as a [`QuerySource`]
///
/// Each record is a JSON object keyed by column name.
pub struct DuckDbSource {
    /// DuckDB connection
    conn: Mutex<Connection>,
    /// SELECT statement to paginate
    query: String,
    /// Outer ORDER BY applied to every fetch
    order_by: Option<String>,
}

impl DuckDbSource {
    /// Wrap an existing connection
    ///
    /// The query is wrapped in an outer `SELECT ... LIMIT ... OFFSET`, so an
    /// `ORDER BY` inside it is not guaranteed to hold across pages. Set
    /// [`with_order_by`](Self::with_order_by) for stable paging.
    pub fn new(conn: Connection, query: impl Into<String>) -> Self {
        let query = query.into();
        Self {
            conn: Mutex::new(conn),
            query: query.trim().trim_end_matches(';').trim_end().to_string(),
            order_by: None,
        }
    }

    /// Open an in-memory database
    pub fn open_in_memory(query: impl Into<String>) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self::new(conn, query))
    }

    /// Open (or create) a database file
    pub fn open(path: impl AsRef<Path>, query: impl Into<String>) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self::new(conn, query))
    }

    /// Page through every row of a table
    pub fn from_table(conn: Connection, table: &str) -> Self {
        Self::new(conn, format!("SELECT * FROM {table}"))
    }

    /// Order every fetched window by this expression (e.g. `"id"` or `"created_at DESC"`)
    #[must_use]
    pub fn with_order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    /// The wrapped query
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Run setup statements (schema, fixtures, ATTACH) on the connection
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.lock()?.execute_batch(sql)?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::Other("DuckDB connection lock poisoned".to_string()))
    }

    fn count_sql(&self) -> String {
        format!("SELECT COUNT(*) FROM ({}) AS q", self.query)
    }

    fn fetch_sql(&self, offset: u64, limit: u64) -> String {
        let offset = offset.min(i64::MAX as u64);
        let limit = limit.min(i64::MAX as u64);
        match &self.order_by {
            Some(order_by) => format!(
                "SELECT * FROM ({}) AS q ORDER BY {order_by} LIMIT {limit} OFFSET {offset}",
                self.query
            ),
            None => format!(
                "SELECT * FROM ({}) AS q LIMIT {limit} OFFSET {offset}",
                self.query
            ),
        }
    }

    fn count_rows(&self) -> Result<u64> {
        let sql = self.count_sql();
        tracing::debug!("Executing count query: {}", sql);

        let conn = self.lock()?;
        let count: i64 = conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(|e| Error::count(e.to_string()))?;

        u64::try_from(count).map_err(|_| Error::count(format!("negative row count {count}")))
    }

    fn fetch_rows(&self, offset: u64, limit: u64) -> Result<Vec<Value>> {
        let sql = self.fetch_sql(offset, limit);
        tracing::debug!("Executing fetch query: {}", sql);

        let conn = self.lock()?;
        let mut stmt = conn.prepare(&sql).map_err(|e| Error::fetch(e.to_string()))?;
        let mut rows = stmt.query([]).map_err(|e| Error::fetch(e.to_string()))?;

        let columns: Vec<String> = rows
            .as_ref()
            .map(|stmt| stmt.column_names())
            .unwrap_or_default();

        let mut records = Vec::new();
        while let Some(row) = rows.next().map_err(|e| Error::fetch(e.to_string()))? {
            let mut object = Map::with_capacity(columns.len());
            for (idx, name) in columns.iter().enumerate() {
                let value: DbValue =
                    row.get(idx).map_err(|e| Error::fetch(e.to_string()))?;
                object.insert(name.clone(), duckdb_value_to_json(value));
            }
            records.push(Value::Object(object));
        }

        Ok(records)
    }
}

#[async_trait]
impl QuerySource for DuckDbSource {
    type Record = Value;

    async fn count(&self) -> Result<u64> {
        self.count_rows()
    }

    async fn fetch(&self, offset: u64, limit: u64) -> Result<Vec<Value>> {
        self.fetch_rows(offset, limit)
    }
}

/// Microseconds for a value stored in `unit`
fn to_micros(unit: TimeUnit, value: i64) -> i64 {
    match unit {
        TimeUnit::Second => value.saturating_mul(1_000_000),
        TimeUnit::Millisecond => value.saturating_mul(1_000),
        TimeUnit::Microsecond => value,
        TimeUnit::Nanosecond => value / 1_000,
    }
}

/// JSON representation of a single DuckDB cell
///
/// Temporal values become ISO-8601 strings, blobs become base64 and 128-bit
/// integers become decimal strings.
fn duckdb_value_to_json(value: DbValue) -> Value {
    match value {
        DbValue::Null => Value::Null,
        DbValue::Boolean(b) => Value::Bool(b),
        DbValue::TinyInt(i) => i.into(),
        DbValue::SmallInt(i) => i.into(),
        DbValue::Int(i) => i.into(),
        DbValue::BigInt(i) => i.into(),
        DbValue::UTinyInt(i) => i.into(),
        DbValue::USmallInt(i) => i.into(),
        DbValue::UInt(i) => i.into(),
        DbValue::UBigInt(i) => i.into(),
        DbValue::HugeInt(i) => Value::String(i.to_string()),
        DbValue::Float(f) => float_to_json(f64::from(f)),
        DbValue::Double(f) => float_to_json(f),
        DbValue::Text(s) => Value::String(s),
        DbValue::Blob(bytes) => Value::String(BASE64.encode(bytes)),
        DbValue::Timestamp(unit, raw) => DateTime::from_timestamp_micros(to_micros(unit, raw))
            .map_or(raw.into(), |dt| {
                dt.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string().into()
            }),
        DbValue::Date32(days) => DateTime::from_timestamp(i64::from(days) * 86_400, 0)
            .map_or(days.into(), |dt| {
                dt.date_naive().format("%Y-%m-%d").to_string().into()
            }),
        DbValue::Time64(unit, raw) => {
            let micros = to_micros(unit, raw);
            u32::try_from(micros.div_euclid(1_000_000))
                .ok()
                .and_then(|secs| {
                    let nanos = (micros.rem_euclid(1_000_000) * 1_000) as u32;
                    NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos)
                })
                .map_or(raw.into(), |time| {
                    time.format("%H:%M:%S%.6f").to_string().into()
                })
        }
        other => Value::String(format!("{other:?}")),
    }
}

/// NaN and infinities have no JSON form
fn float_to_json(f: f64) -> Value {
    serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number)
}
