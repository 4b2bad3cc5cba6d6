//! SQLite implementation of the Ledger trait.
//!
//! World state lives in a single `world_state` table. Selectors are
//! translated into `json_extract` equality clauses with bound parameters,
//! so neither field names nor values are ever spliced into SQL text.
//! All calls run on tokio's blocking pool.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use crate::error::{LedgerError, Result};
use crate::migration;
use crate::selector::SelectorQuery;
use crate::traits::{KeyValue, Ledger, QueryIterator};

/// SQLite-backed world state.
///
/// Thread-safe via internal Mutex.
pub struct SqliteLedger {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteLedger {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Number of keys in world state.
    pub async fn len(&self) -> Result<usize> {
        self.with_conn(|conn| {
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM world_state", [], |row| row.get(0))?;
            Ok(count as usize)
        })
        .await
    }

    /// Run `f` against the connection on the blocking pool.
    async fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| LedgerError::Poisoned(e.to_string()))?;
            f(&conn)
        })
        .await?
    }
}

/// Build the WHERE clause and parameters for a parsed selector.
///
/// Stored values that are not valid JSON objects never match. A clause only
/// holds for a JSON string member equal to the operand.
fn selector_sql(query: &SelectorQuery) -> (String, Vec<String>) {
    let mut sql = String::from(
        "SELECT key, value FROM world_state WHERE CASE \
         WHEN json_valid(CAST(value AS TEXT)) THEN json_type(CAST(value AS TEXT)) = 'object'",
    );
    let mut bound = Vec::with_capacity(query.clauses().len() * 2);

    for (field, value) in query.clauses() {
        let path = bound.len() + 1;
        let operand = path + 1;
        sql.push_str(&format!(
            " AND json_type(CAST(value AS TEXT), ?{path}) = 'text' \
             AND json_extract(CAST(value AS TEXT), ?{path}) = ?{operand}"
        ));
        bound.push(format!("$.\"{field}\""));
        bound.push(value.clone());
    }

    sql.push_str(" ELSE 0 END");
    (sql, bound)
}

#[async_trait]
impl Ledger for SqliteLedger {
    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        let key = key.to_string();
        self.with_conn(move |conn| {
            let value: Option<Vec<u8>> = conn
                .query_row(
                    "SELECT value FROM world_state WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(value.map(Bytes::from))
        })
        .await
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        if key.is_empty() {
            return Err(LedgerError::Write {
                key: String::new(),
                reason: "key must not be empty".to_string(),
            });
        }

        let key = key.to_string();
        let value = value.to_vec();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO world_state (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, migration::now_millis()],
            )
            .map_err(|e| LedgerError::Write {
                key: key.clone(),
                reason: e.to_string(),
            })?;
            Ok(())
        })
        .await
    }

    async fn query(&self, selector: &str) -> Result<QueryIterator> {
        let query = SelectorQuery::parse(selector)?;
        let (sql, bound) = selector_sql(&query);

        let rows = self
            .with_conn(move |conn| {
                let query_failed = |e: rusqlite::Error| LedgerError::Query {
                    selector: query.as_str().to_string(),
                    reason: e.to_string(),
                };

                let mut stmt = conn.prepare(&sql).map_err(query_failed)?;
                let rows = stmt
                    .query_map(params_from_iter(bound.iter()), |row| {
                        Ok(KeyValue {
                            key: row.get(0)?,
                            value: Bytes::from(row.get::<_, Vec<u8>>(1)?),
                        })
                    })
                    .map_err(query_failed)?
                    .collect::<rusqlite::Result<Vec<_>>>()
                    .map_err(query_failed)?;
                Ok(rows)
            })
            .await?;

        tracing::debug!(selector, matches = rows.len(), "evaluated selector");
        Ok(QueryIterator::new(rows.into_iter().map(Ok)))
    }
}
