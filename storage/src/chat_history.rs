//! Conversation memory model and store trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StorageError;

/// Key under which a chat's history is stored: `history-{chat_id}` or `history-default`.
pub fn history_key(chat_id: Option<&str>) -> String {
    match chat_id {
        Some(id) if !id.is_empty() => format!("history-{}", id),
        _ => "history-default".to_string(),
    }
}

/// Who said it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryRole {
    User,
    Assistant,
}

impl fmt::Display for HistoryRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryRole::User => f.write_str("user"),
            HistoryRole::Assistant => f.write_str("assistant"),
        }
    }
}

impl FromStr for HistoryRole {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(HistoryRole::User),
            "assistant" => Ok(HistoryRole::Assistant),
            other => Err(StorageError::InvalidData(format!("unknown history role: {}", other))),
        }
    }
}

/// One remembered turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: HistoryRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: HistoryRole::User,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: HistoryRole::Assistant,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// Append-only per-key conversation buffer.
#[async_trait]
pub trait ChatHistoryStore: Send + Sync {
    async fn append(&self, key: &str, entry: HistoryEntry) -> Result<(), StorageError>;

    /// Last `limit` entries for `key`, oldest first.
    async fn recent(&self, key: &str, limit: usize) -> Result<Vec<HistoryEntry>, StorageError>;

    /// Total number of entries stored for `key`.
    async fn count(&self, key: &str) -> Result<usize, StorageError>;

    async fn clear(&self, key: &str) -> Result<(), StorageError>;
}
