//! Storage crate: conversation memory for the agent.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`chat_history`] – `ChatHistoryStore` trait, `HistoryEntry`, `history_key`
//! - [`sqlite_history`] – SQLite-backed store
//! - [`inmemory_history`] – process-local store
//! - [`sqlite_pool`] – SqlitePoolManager

mod chat_history;
mod error;
mod inmemory_history;
mod sqlite_history;
mod sqlite_pool;

pub use chat_history::{history_key, ChatHistoryStore, HistoryEntry, HistoryRole};
pub use error::StorageError;
pub use inmemory_history::InMemoryChatHistory;
pub use sqlite_history::SqliteChatHistory;
pub use sqlite_pool::SqlitePoolManager;
