//! Integration tests for [`storage::SqliteChatHistory`].
//!
//! Covers ordering, windowing, per-key isolation, clearing and persistence across reopen, using
//! in-memory and temp-file SQLite databases.

use storage::{history_key, ChatHistoryStore, HistoryEntry, HistoryRole, SqliteChatHistory};
use tempfile::TempDir;

async fn memory_store() -> SqliteChatHistory {
    SqliteChatHistory::new("sqlite::memory:")
        .await
        .expect("Failed to create in-memory history store")
}

/// **Test: recent() returns the newest entries in chronological order.**
///
/// **Setup:** Append 15 alternating user/assistant entries to one key.
/// **Action:** `recent(key, 4)`.
/// **Expected:** The last 4 entries, oldest first, roles preserved.
#[tokio::test]
async fn test_recent_returns_window_oldest_first() {
    let store = memory_store().await;
    let key = history_key(Some("12345"));

    for i in 0..15 {
        let entry = if i % 2 == 0 {
            HistoryEntry::user(format!("Message {}", i))
        } else {
            HistoryEntry::assistant(format!("Message {}", i))
        };
        store.append(&key, entry).await.expect("Failed to append");
    }

    let recent = store.recent(&key, 4).await.expect("Failed to query");

    let contents: Vec<_> = recent.iter().map(|e| e.content.as_str()).collect();
    assert_eq!(contents, vec!["Message 11", "Message 12", "Message 13", "Message 14"]);
    assert_eq!(recent[0].role, HistoryRole::Assistant);
    assert_eq!(recent[1].role, HistoryRole::User);
    assert_eq!(store.count(&key).await.unwrap(), 15);
}

/// **Test: keys are isolated.**
#[tokio::test]
async fn test_history_filtered_by_key() {
    let store = memory_store().await;
    let key1 = history_key(Some("100"));
    let key2 = history_key(Some("200"));

    for i in 0..3 {
        store.append(&key1, HistoryEntry::user(format!("a{}", i))).await.unwrap();
    }
    store.append(&key2, HistoryEntry::user("b0")).await.unwrap();

    assert_eq!(store.count(&key1).await.unwrap(), 3);
    assert_eq!(store.count(&key2).await.unwrap(), 1);
    let only_b = store.recent(&key2, 10).await.unwrap();
    assert_eq!(only_b.len(), 1);
    assert_eq!(only_b[0].content, "b0");
}

/// **Test: empty key and zero limit.**
#[tokio::test]
async fn test_recent_empty_and_zero_limit() {
    let store = memory_store().await;
    assert!(store.recent("history-none", 10).await.unwrap().is_empty());
    assert_eq!(store.count("history-none").await.unwrap(), 0);

    store.append("history-x", HistoryEntry::user("hi")).await.unwrap();
    assert!(store.recent("history-x", 0).await.unwrap().is_empty());
}

/// **Test: clear() removes one key's entries.**
#[tokio::test]
async fn test_clear() {
    let store = memory_store().await;
    store.append("history-1", HistoryEntry::user("x")).await.unwrap();
    store.append("history-2", HistoryEntry::user("y")).await.unwrap();

    store.clear("history-1").await.unwrap();

    assert_eq!(store.count("history-1").await.unwrap(), 0);
    assert_eq!(store.count("history-2").await.unwrap(), 1);
}

/// **Test: a file-backed store keeps entries across reopen (`file:` prefix accepted).**
#[tokio::test]
async fn test_file_database_persists_across_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let url = format!("file:{}/history.db", temp_dir.path().display());

    {
        let store = SqliteChatHistory::new(&url).await.unwrap();
        store.append("history-7", HistoryEntry::user("remember me")).await.unwrap();
    }

    let reopened = SqliteChatHistory::new(&url).await.unwrap();
    let entries = reopened.recent("history-7", 5).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].content, "remember me");
}
