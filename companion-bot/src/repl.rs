//! Local chat: the same handler chain on stdin/stdout, no Telegram needed.

use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;
use dbot_core::{Bot, Chat, HandlerResponse, MediaBlock, MediaContent, Message, User};
use handler_chain::HandlerChain;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::error;

/// Chat id used for the local conversation.
pub const LOCAL_CHAT_ID: i64 = 0;

/// Prints replies to stdout; media bytes are written under `media_dir`.
pub struct ConsoleBot {
    media_dir: PathBuf,
}

impl ConsoleBot {
    pub fn new(media_dir: impl Into<PathBuf>) -> Self {
        Self {
            media_dir: media_dir.into(),
        }
    }

    pub fn media_dir(&self) -> &Path {
        &self.media_dir
    }

    /// `({mime}: {location})`, where location is the URL or the written file.
    pub async fn render_media(&self, media: &MediaBlock) -> dbot_core::Result<String> {
        let location = match &media.content {
            MediaContent::Url(url) => url.clone(),
            MediaContent::Bytes(bytes) => {
                tokio::fs::create_dir_all(&self.media_dir).await?;
                let path = self.media_dir.join(media.file_name());
                tokio::fs::write(&path, bytes).await?;
                path.display().to_string()
            }
        };
        Ok(format!("({}: {})", media.mime_type, location))
    }
}

#[async_trait]
impl Bot for ConsoleBot {
    async fn send_message(&self, _chat: &Chat, text: &str) -> dbot_core::Result<()> {
        println!("{}", text);
        Ok(())
    }

    async fn send_media(&self, _chat: &Chat, media: &MediaBlock) -> dbot_core::Result<()> {
        println!("{}", self.render_media(media).await?);
        Ok(())
    }
}

fn local_message(content: &str) -> Message {
    let user = User {
        id: LOCAL_CHAT_ID,
        username: Some("local".to_string()),
        first_name: None,
        last_name: None,
    };
    let chat = Chat {
        id: LOCAL_CHAT_ID,
        chat_type: "private".to_string(),
    };
    Message::text(user, chat, content)
}

/// Reads lines from stdin until EOF and answers each through the chain.
pub async fn run_chat(chain: HandlerChain, console: ConsoleBot) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let message = local_message(line);
        match chain.handle(&message).await {
            Ok(HandlerResponse::Reply(blocks)) => {
                if let Err(e) = console.send_blocks(&message.chat, &blocks).await {
                    error!(error = %e, "Failed to print reply");
                }
            }
            Ok(_) => {}
            Err(e) => error!(error = %e, "Handler chain failed"),
        }
    }
    Ok(())
}
