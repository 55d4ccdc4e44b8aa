//! The companion itself: runs the agent and turns its answer into text and media blocks.

use agent::{AgentExecutor, Tool};
use async_trait::async_trait;
use dbot_core::{Handler, HandlerResponse, MediaStore, Message, ReplyBlock, Result};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::response::{is_uuid, split_response};

pub const APOLOGY: &str = "Sorry, I can't answer right now. Please try again in a moment.";

pub struct CompanionHandler {
    executor: Arc<AgentExecutor>,
    media: Arc<dyn MediaStore>,
    /// Speaks every text segment when set.
    voice: Option<Arc<dyn Tool>>,
}

impl CompanionHandler {
    pub fn new(executor: Arc<AgentExecutor>, media: Arc<dyn MediaStore>) -> Self {
        Self {
            executor,
            media,
            voice: None,
        }
    }

    pub fn with_voice(mut self, voice: Option<Arc<dyn Tool>>) -> Self {
        self.voice = voice;
        self
    }

    /// Runs one turn for `chat_id` and returns the blocks to send, in order.
    pub async fn respond(&self, chat_id: &str, text: &str) -> anyhow::Result<Vec<ReplyBlock>> {
        let answer = self.executor.run(Some(chat_id), text).await?;
        let segments = self.with_voice_notes(split_response(&answer)).await;

        let mut blocks = Vec::with_capacity(segments.len());
        for segment in segments {
            if is_uuid(&segment) {
                if let Some(block) = self.resolve_media(&segment).await {
                    blocks.push(block);
                }
            } else {
                blocks.push(ReplyBlock::Text(segment));
            }
        }
        Ok(blocks)
    }

    /// Inserts a voice note after every text segment.
    async fn with_voice_notes(&self, segments: Vec<String>) -> Vec<String> {
        let Some(voice) = &self.voice else {
            return segments;
        };
        let mut out = Vec::with_capacity(segments.len() * 2);
        for segment in segments {
            let speak = !is_uuid(&segment);
            let spoken = if speak {
                match voice.run(&segment).await {
                    Ok(id) => Some(id),
                    Err(e) => {
                        warn!(error = %e, "Voice note failed, sending text only");
                        None
                    }
                }
            } else {
                None
            };
            out.push(segment);
            out.extend(spoken);
        }
        out
    }

    async fn resolve_media(&self, segment: &str) -> Option<ReplyBlock> {
        let id = match Uuid::parse_str(segment) {
            Ok(id) => id,
            Err(e) => {
                warn!(segment, error = %e, "Unparseable media id");
                return None;
            }
        };
        match self.media.get(&id).await {
            Ok(Some(media)) => Some(ReplyBlock::Media(media)),
            Ok(None) => {
                warn!(media_id = %id, "Answer references unknown media, dropping it");
                None
            }
            Err(e) => {
                warn!(media_id = %id, error = %e, "Media lookup failed, dropping it");
                None
            }
        }
    }
}

#[async_trait]
impl Handler for CompanionHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let text = message.content.trim();
        if text.is_empty() {
            return Ok(HandlerResponse::Continue);
        }

        match self.respond(&message.chat.id.to_string(), text).await {
            Ok(blocks) => {
                info!(block_count = blocks.len(), "Companion answered");
                Ok(HandlerResponse::Reply(blocks))
            }
            Err(e) => {
                error!(error = %e, "Companion failed to answer");
                Ok(HandlerResponse::Reply(vec![ReplyBlock::text(APOLOGY)]))
            }
        }
    }
}
