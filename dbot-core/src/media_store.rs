//! Media store: generated media is kept here and referenced from agent text by its UUID.

use std::num::NonZeroUsize;

use async_trait::async_trait;
use lru::LruCache;
use parking_lot::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::block::MediaBlock;
use crate::error::Result;

/// Storage for generated media blocks, addressed by id.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Stores the block under its own id and returns that id.
    async fn put(&self, block: MediaBlock) -> Result<Uuid>;
    /// Looks up a block; `None` if the id was never stored.
    async fn get(&self, id: &Uuid) -> Result<Option<MediaBlock>>;
}

/// Blocks kept by [`InMemoryMediaStore::new`].
pub const DEFAULT_MEDIA_CAPACITY: usize = 256;

/// Process-local media store holding the most recently used blocks. Content does not survive
/// restarts; once full, the least recently used block is evicted.
pub struct InMemoryMediaStore {
    blocks: Mutex<LruCache<Uuid, MediaBlock>>,
}

impl Default for InMemoryMediaStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryMediaStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MEDIA_CAPACITY)
    }

    /// A capacity of 0 is treated as 1.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            blocks: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.blocks.lock().cap().get()
    }

    pub fn len(&self) -> usize {
        self.blocks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.lock().is_empty()
    }
}

#[async_trait]
impl MediaStore for InMemoryMediaStore {
    async fn put(&self, block: MediaBlock) -> Result<Uuid> {
        let id = block.id;
        let mime_type = block.mime_type.clone();
        let evicted = self.blocks.lock().push(id, block);
        debug!(media_id = %id, mime_type = %mime_type, "Stored media block");
        if let Some((old_id, _)) = evicted.filter(|(old_id, _)| *old_id != id) {
            debug!(media_id = %old_id, "Evicted least recently used media block");
        }
        Ok(id)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<MediaBlock>> {
        Ok(self.blocks.lock().get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_get_returns_same_block() {
        let store = InMemoryMediaStore::new();
        let block = MediaBlock::from_url("image/png", "https://example.com/selfie.png");
        let id = store.put(block.clone()).await.unwrap();

        assert_eq!(id, block.id);
        assert_eq!(store.get(&id).await.unwrap(), Some(block));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let store = InMemoryMediaStore::new();
        assert!(store.get(&Uuid::new_v4()).await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_full_store_evicts_least_recently_used() {
        let store = InMemoryMediaStore::with_capacity(2);
        let first = store
            .put(MediaBlock::from_bytes("audio/mpeg", vec![1]))
            .await
            .unwrap();
        let second = store
            .put(MediaBlock::from_bytes("audio/mpeg", vec![2]))
            .await
            .unwrap();

        // Reading `first` makes `second` the eviction candidate.
        assert!(store.get(&first).await.unwrap().is_some());
        let third = store
            .put(MediaBlock::from_bytes("audio/mpeg", vec![3]))
            .await
            .unwrap();

        assert_eq!(store.len(), 2);
        assert!(store.get(&second).await.unwrap().is_none());
        assert!(store.get(&first).await.unwrap().is_some());
        assert!(store.get(&third).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_store_stays_bounded_over_many_puts() {
        let store = InMemoryMediaStore::with_capacity(8);
        for i in 0..50u8 {
            store
                .put(MediaBlock::from_bytes("audio/mpeg", vec![i]))
                .await
                .unwrap();
        }
        assert_eq!(store.len(), 8);
        assert_eq!(InMemoryMediaStore::new().capacity(), DEFAULT_MEDIA_CAPACITY);
        assert_eq!(InMemoryMediaStore::with_capacity(0).capacity(), 1);
    }
}
