//! Process-local conversation history. Used for tests and `HISTORY_STORE=memory`.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::chat_history::{ChatHistoryStore, HistoryEntry};
use crate::error::StorageError;

#[derive(Default)]
pub struct InMemoryChatHistory {
    entries: RwLock<HashMap<String, Vec<HistoryEntry>>>,
}

impl InMemoryChatHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatHistoryStore for InMemoryChatHistory {
    async fn append(&self, key: &str, entry: HistoryEntry) -> Result<(), StorageError> {
        self.entries
            .write()
            .await
            .entry(key.to_string())
            .or_default()
            .push(entry);
        Ok(())
    }

    async fn recent(&self, key: &str, limit: usize) -> Result<Vec<HistoryEntry>, StorageError> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .map(|list| {
                let start = list.len().saturating_sub(limit);
                list[start..].to_vec()
            })
            .unwrap_or_default())
    }

    async fn count(&self, key: &str) -> Result<usize, StorageError> {
        Ok(self.entries.read().await.get(key).map_or(0, Vec::len))
    }

    async fn clear(&self, key: &str) -> Result<(), StorageError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
