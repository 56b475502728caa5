use async_trait::async_trait;
use bytes::Bytes;
use sqlx::SqlitePool;

/// Local key-value storage for persisted blobs (the user's dish collection).
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn put(&self, key: &str, value: Bytes) -> anyhow::Result<()>;
    async fn get(&self, key: &str) -> anyhow::Result<Option<Bytes>>;
}

#[derive(Clone)]
pub struct SqliteKv {
    pool: SqlitePool,
}

impl SqliteKv {
    pub async fn new(pool: SqlitePool) -> anyhow::Result<Self> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value BLOB NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl KvStore for SqliteKv {
    async fn put(&self, key: &str, value: Bytes) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO kv (key, value) VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value.as_ref())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> anyhow::Result<Option<Bytes>> {
        let row: Option<(Vec<u8>,)> =
            sqlx::query_as(r#"SELECT value FROM kv WHERE key = $1"#)
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(v,)| Bytes::from(v)))
    }
}

/// In-memory store used by tests.
#[derive(Clone, Default)]
pub struct MemoryKv {
    entries: std::sync::Arc<std::sync::Mutex<std::collections::HashMap<String, Bytes>>>,
}

#[async_trait]
impl KvStore for MemoryKv {
    async fn put(&self, key: &str, value: Bytes) -> anyhow::Result<()> {
        self.entries
            .lock()
            .expect("kv mutex poisoned")
            .insert(key.to_string(), value);
        Ok(())
    }

    async fn get(&self, key: &str) -> anyhow::Result<Option<Bytes>> {
        Ok(self
            .entries
            .lock()
            .expect("kv mutex poisoned")
            .get(key)
            .cloned())
    }
}
