//! SQLite-backed conversation history.
//!
//! Entries are ordered by an autoincrement sequence rather than timestamps, so turns appended
//! within the same clock tick keep their order.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::chat_history::{ChatHistoryStore, HistoryEntry, HistoryRole};
use crate::error::StorageError;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct SqliteChatHistory {
    pool_manager: SqlitePoolManager,
}

impl SqliteChatHistory {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let store = Self { pool_manager };
        store.init().await?;
        Ok(store)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating chat_history table if not exist");
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS chat_history (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                history_key TEXT NOT NULL,
                role TEXT NOT NULL,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_chat_history_key ON chat_history(history_key, seq)",
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl ChatHistoryStore for SqliteChatHistory {
    async fn append(&self, key: &str, entry: HistoryEntry) -> Result<(), StorageError> {
        sqlx::query(
            "INSERT INTO chat_history (history_key, role, content, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(key)
        .bind(entry.role.to_string())
        .bind(&entry.content)
        .bind(entry.created_at)
        .execute(self.pool_manager.pool())
        .await?;

        debug!(history_key = %key, role = %entry.role, "Appended history entry");
        Ok(())
    }

    async fn recent(&self, key: &str, limit: usize) -> Result<Vec<HistoryEntry>, StorageError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let rows: Vec<(String, String, DateTime<Utc>)> = sqlx::query_as(
            r#"
            SELECT role, content, created_at FROM chat_history
            WHERE history_key = ?
            ORDER BY seq DESC
            LIMIT ?
            "#,
        )
        .bind(key)
        .bind(limit as i64)
        .fetch_all(self.pool_manager.pool())
        .await?;

        let mut entries = rows
            .into_iter()
            .map(|(role, content, created_at)| {
                Ok(HistoryEntry {
                    role: role.parse::<HistoryRole>()?,
                    content,
                    created_at,
                })
            })
            .collect::<Result<Vec<_>, StorageError>>()?;
        entries.reverse();
        Ok(entries)
    }

    async fn count(&self, key: &str) -> Result<usize, StorageError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM chat_history WHERE history_key = ?")
                .bind(key)
                .fetch_one(self.pool_manager.pool())
                .await?;
        Ok(count.max(0) as usize)
    }

    async fn clear(&self, key: &str) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM chat_history WHERE history_key = ?")
            .bind(key)
            .execute(self.pool_manager.pool())
            .await?;
        info!(history_key = %key, removed = result.rows_affected(), "Cleared chat history");
        Ok(())
    }
}
