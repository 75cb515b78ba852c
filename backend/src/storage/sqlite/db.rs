use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::path::Path;
use std::sync::Arc;

use crate::storage::traits::KeyValueStore;

/// SqliteKeyValueStore manages the key-value cache database
#[derive(Clone)]
pub struct SqliteKeyValueStore {
    pool: Arc<SqlitePool>,
}

impl SqliteKeyValueStore {
    /// Open (creating if needed) the cache database at `path`
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening key-value cache at {}", path.display());

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        // A single connection keeps every write visible to the next read
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open key-value cache at {}", path.display()))?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS key_values (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await
        .context("Failed to create key_values table")?;

        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get_value(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM key_values WHERE key = ?")
            .bind(key)
            .fetch_optional(&*self.pool)
            .await
            .with_context(|| format!("Failed to read cache key {}", key))?;

        Ok(row.map(|r| r.get::<String, _>("value")))
    }

    async fn put_value(&self, key: &str, value: &str) -> Result<()> {
        debug!("Writing cache key {} ({} bytes)", key, value.len());
        sqlx::query("INSERT OR REPLACE INTO key_values (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(&*self.pool)
            .await
            .with_context(|| format!("Failed to write cache key {}", key))?;
        Ok(())
    }

    async fn delete_value(&self, key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM key_values WHERE key = ?")
            .bind(key)
            .execute(&*self.pool)
            .await
            .with_context(|| format!("Failed to delete cache key {}", key))?;
        Ok(result.rows_affected() > 0)
    }
}
