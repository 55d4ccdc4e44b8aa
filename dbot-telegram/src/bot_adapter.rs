//! Wraps teloxide::Bot and implements [`dbot_core::Bot`]. Text goes out via sendMessage; media is
//! routed to sendPhoto / sendVoice / sendAudio / sendVideo / sendDocument by MIME type.

use async_trait::async_trait;
use dbot_core::{Bot as CoreBot, Chat, DbotError, MediaBlock, MediaContent, MediaKind, Result};
use teloxide::prelude::*;
use teloxide::types::{ChatId, InputFile};
use tracing::{debug, instrument};

/// Builds the upload for a media block: URL content is passed by reference, bytes are uploaded as `<uuid>.<ext>`.
pub fn to_input_file(media: &MediaBlock) -> Result<InputFile> {
    match &media.content {
        MediaContent::Url(url) => {
            let parsed = reqwest::Url::parse(url)
                .map_err(|e| DbotError::Media(format!("Invalid media URL {}: {}", url, e)))?;
            Ok(InputFile::url(parsed))
        }
        MediaContent::Bytes(bytes) => Ok(InputFile::memory(bytes.clone()).file_name(media.file_name())),
    }
}

/// Thin wrapper around teloxide::Bot that implements dbot-core's Bot trait.
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }

    #[instrument(skip(self, chat, media), fields(chat_id = chat.id, media_id = %media.id, mime_type = %media.mime_type))]
    async fn send_media(&self, chat: &Chat, media: &MediaBlock) -> Result<()> {
        let input = to_input_file(media)?;
        let chat_id = ChatId(chat.id);
        let sent = match media.kind() {
            MediaKind::Image => self.bot.send_photo(chat_id, input).await,
            MediaKind::Audio if media.mime_type.eq_ignore_ascii_case("audio/ogg") => {
                self.bot.send_voice(chat_id, input).await
            }
            MediaKind::Audio => self.bot.send_audio(chat_id, input).await,
            MediaKind::Video => self.bot.send_video(chat_id, input).await,
            MediaKind::Other => self.bot.send_document(chat_id, input).await,
        };
        sent.map_err(|e| DbotError::Bot(e.to_string()))?;
        debug!("Media sent");
        Ok(())
    }
}
