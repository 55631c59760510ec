use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use opentask_core::{merge_patch, new_id, now_rfc3339};
use serde_json::Value;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use tracing::info;

use crate::error::DocError;
use crate::retry::{RetryPolicy, retry_fixed};
use crate::store::{DocPage, DocStore};

pub const DEFAULT_MIN_POOL_SIZE: u32 = 2;
pub const DEFAULT_MAX_POOL_SIZE: u32 = 10;
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 15;

/// Connection settings for the SQLite document store.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    pub url: String,
    pub min_pool_size: u32,
    pub max_pool_size: u32,
    pub acquire_timeout: Duration,
}

impl ConnectOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            min_pool_size: DEFAULT_MIN_POOL_SIZE,
            max_pool_size: DEFAULT_MAX_POOL_SIZE,
            acquire_timeout: Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
        }
    }
}

/// SQLite-backed document store.
///
/// Each collection is one table holding the document as a JSON `data`
/// column next to the indexed `id` and `created_at` columns.
pub struct SqliteDocStore {
    pool: SqlitePool,
}

impl SqliteDocStore {
    /// Open a connection pool against the given database URL.
    pub async fn connect(options: &ConnectOptions) -> Result<Self, DocError> {
        let connect = SqliteConnectOptions::from_str(&options.url)
            .map_err(|e| DocError::Connection(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .min_connections(options.min_pool_size)
            .max_connections(options.max_pool_size)
            .acquire_timeout(options.acquire_timeout)
            .connect_with(connect)
            .await
            .map_err(|e| DocError::Connection(e.to_string()))?;

        info!(url = %options.url, "connected to document store");
        Ok(Self { pool })
    }

    /// Open the pool, retrying on failure per the given policy.
    pub async fn connect_with_retry(
        options: &ConnectOptions,
        policy: &RetryPolicy,
    ) -> Result<Self, DocError> {
        retry_fixed(policy, || Self::connect(options)).await
    }

    /// Open an in-memory store for tests and local development.
    ///
    /// In-memory databases exist per connection, so the pool is capped
    /// at a single connection.
    pub async fn connect_in_memory() -> Result<Self, DocError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| DocError::Connection(e.to_string()))?;
        Ok(Self { pool })
    }

    /// Close the pool, waiting for in-flight queries to finish.
    pub async fn disconnect(&self) {
        self.pool.close().await;
        info!("document store disconnected");
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}

#[async_trait]
impl DocStore for SqliteDocStore {
    async fn ensure_collection(&self, collection: &str) -> Result<(), DocError> {
        // Collection names come from module code, never from request input.
        let schema = format!(
            "CREATE TABLE IF NOT EXISTS {collection} (
                id          TEXT PRIMARY KEY,
                data        TEXT NOT NULL,
                created_at  TEXT NOT NULL
            )"
        );
        sqlx::query(&schema).execute(&self.pool).await?;

        let index = format!(
            "CREATE INDEX IF NOT EXISTS idx_{collection}_created_at ON {collection}(created_at)"
        );
        sqlx::query(&index).execute(&self.pool).await?;
        Ok(())
    }

    async fn insert(&self, collection: &str, doc: Value) -> Result<Value, DocError> {
        let mut doc = doc;
        let obj = doc
            .as_object_mut()
            .ok_or_else(|| DocError::Document("document must be a JSON object".to_string()))?;

        let id = match obj.get("id").and_then(Value::as_str) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                let id = new_id();
                obj.insert("id".to_string(), Value::String(id.clone()));
                id
            }
        };
        let created_at = match obj.get("createdAt").and_then(Value::as_str) {
            Some(ts) if !ts.is_empty() => ts.to_string(),
            _ => {
                let ts = now_rfc3339();
                obj.insert("createdAt".to_string(), Value::String(ts.clone()));
                ts
            }
        };

        let data = serde_json::to_string(&doc)?;
        let sql = format!("INSERT INTO {collection} (id, data, created_at) VALUES (?, ?, ?)");
        sqlx::query(&sql)
            .bind(&id)
            .bind(&data)
            .bind(&created_at)
            .execute(&self.pool)
            .await?;

        Ok(doc)
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Value>, DocError> {
        let sql = format!("SELECT data FROM {collection} WHERE id = ?");
        let row: Option<(String,)> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some((data,)) => Ok(Some(serde_json::from_str(&data)?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<Value>, DocError> {
        let sql = format!("SELECT data FROM {collection} ORDER BY created_at ASC, id ASC");
        let rows: Vec<(String,)> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;

        rows.into_iter()
            .map(|(data,)| serde_json::from_str(&data).map_err(DocError::from))
            .collect()
    }

    async fn find_one_and_update(
        &self,
        collection: &str,
        id: &str,
        patch: Value,
    ) -> Result<Option<Value>, DocError> {
        let Some(mut doc) = self.find_by_id(collection, id).await? else {
            return Ok(None);
        };
        merge_patch(&mut doc, &patch);

        let data = serde_json::to_string(&doc)?;
        let sql = format!("UPDATE {collection} SET data = ? WHERE id = ?");
        let result = sqlx::query(&sql)
            .bind(&data)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            // Deleted between the read and the write.
            return Ok(None);
        }
        Ok(Some(doc))
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<u64, DocError> {
        let sql = format!("DELETE FROM {collection} WHERE id = ?");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn page(&self, collection: &str, offset: i64, limit: i64) -> Result<DocPage, DocError> {
        // Count total
        let count_sql = format!("SELECT COUNT(*) FROM {collection}");
        let (total,): (i64,) = sqlx::query_as(&count_sql).fetch_one(&self.pool).await?;

        // Fetch page
        let sql = format!(
            "SELECT data FROM {collection} ORDER BY created_at ASC, id ASC LIMIT ? OFFSET ?"
        );
        let rows: Vec<(String,)> = sqlx::query_as(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let docs = rows
            .into_iter()
            .map(|(data,)| serde_json::from_str(&data).map_err(DocError::from))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DocPage {
            docs,
            total: total as u64,
        })
    }
}
