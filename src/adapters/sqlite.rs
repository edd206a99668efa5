use crate::domain::model::{Execution, Row};
use crate::domain::ports::{ConfigProvider, Database};
use crate::utils::error::{Result, TrackerError};
use async_trait::async_trait;
use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{params_from_iter, Connection};
use serde_json::Value;
use std::sync::{Mutex, MutexGuard};

pub const SCHEMA: &str = include_str!("../../db/schema.sql");
pub const SAMPLE_DATA: &str = include_str!("../../db/seed.sql");

pub const IN_MEMORY: &str = ":memory:";

/// SQLite-backed data access. One connection for the whole session.
pub struct SqliteDatabase {
    conn: Mutex<Connection>,
}

impl SqliteDatabase {
    /// Opens `path`, or a private in-memory database for `:memory:`.
    pub fn open(path: &str) -> Result<Self> {
        let conn = if path == IN_MEMORY {
            Connection::open_in_memory()?
        } else {
            Connection::open(path)?
        };
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        tracing::debug!("Opened database at {}", path);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::open(IN_MEMORY)
    }

    /// Opens the configured database and prepares it: schema first, then
    /// sample data when asked for.
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let db = Self::open(config.database_path())?;
        if config.create_schema() {
            db.apply_schema()?;
        }
        if config.seed_sample_data() {
            db.seed_sample_data()?;
        }
        Ok(db)
    }

    pub fn apply_schema(&self) -> Result<()> {
        self.lock()?.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Loads the sample directory, but only into an empty database.
    /// Returns whether anything was inserted.
    pub fn seed_sample_data(&self) -> Result<bool> {
        let conn = self.lock()?;
        let departments: i64 =
            conn.query_row("SELECT COUNT(*) FROM department", [], |row| row.get(0))?;
        if departments > 0 {
            tracing::info!("Database already has data, skipping sample data");
            return Ok(false);
        }
        conn.execute_batch(SAMPLE_DATA)?;
        tracing::info!("Loaded sample data");
        Ok(true)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| TrackerError::ConnectionUnavailable)
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        tracing::debug!(sql, params = ?params, "query");
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();

        let rows = stmt.query_map(params_from_iter(params.iter().map(to_sql)), |row| {
            let mut fields = Vec::with_capacity(columns.len());
            for (i, column) in columns.iter().enumerate() {
                fields.push((column.clone(), from_sql(row.get_ref(i)?)));
            }
            Ok(Row::new(fields))
        })?;

        let rows = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    async fn execute(&self, sql: &str, params: &[Value]) -> Result<Execution> {
        tracing::debug!(sql, params = ?params, "execute");
        let conn = self.lock()?;
        let affected = conn.execute(sql, params_from_iter(params.iter().map(to_sql)))?;

        Ok(Execution {
            affected,
            last_insert_id: conn.last_insert_rowid(),
        })
    }

    fn close(self) -> Result<()> {
        let conn = self
            .conn
            .into_inner()
            .map_err(|_| TrackerError::ConnectionUnavailable)?;
        conn.close().map_err(|(_, e)| TrackerError::Database(e))
    }
}

fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => SqlValue::Real(n.as_f64().unwrap_or_default()),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        other => SqlValue::Text(other.to_string()),
    }
}

fn from_sql(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::String(format!("<{} bytes>", bytes.len())),
    }
}
