//! Bot abstraction for emitting replies.
//!
//! [`Bot`] is transport-agnostic; dbot-telegram implements it via teloxide, the local chat loop
//! implements it on stdout, and tests use recording mocks.

use crate::block::{MediaBlock, ReplyBlock};
use crate::error::{DbotError, Result};
use crate::types::Chat;
use async_trait::async_trait;
use tracing::warn;

/// Abstraction for sending text and media to a chat. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Sends a media block (photo, voice, video...) to the given chat.
    async fn send_media(&self, chat: &Chat, media: &MediaBlock) -> Result<()>;

    /// Emits blocks in order. Blank text blocks are skipped. A failed block is logged and the
    /// remaining blocks are still sent; the failures are reported together at the end.
    async fn send_blocks(&self, chat: &Chat, blocks: &[ReplyBlock]) -> Result<()> {
        let mut failures = Vec::new();
        for (index, block) in blocks.iter().enumerate() {
            let sent = match block {
                ReplyBlock::Text(text) => {
                    if text.trim().is_empty() {
                        continue;
                    }
                    self.send_message(chat, text).await
                }
                ReplyBlock::Media(media) => self.send_media(chat, media).await,
            };
            if let Err(e) = sent {
                warn!(chat_id = chat.id, block_index = index, error = %e, "Failed to send reply block");
                failures.push(format!("block {}: {}", index, e));
            }
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(DbotError::Bot(format!(
                "{} of {} reply blocks failed: {}",
                failures.len(),
                blocks.len(),
                failures.join("; ")
            )))
        }
    }
}
