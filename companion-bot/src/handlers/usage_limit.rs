//! Free-usage limiter for public deployments.

use agent::AgentExecutor;
use async_trait::async_trait;
use dbot_core::{Handler, HandlerResponse, Message, ReplyBlock, Result};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Limiter settings. An empty whitelist disables limiting.
#[derive(Debug, Clone)]
pub struct UsageLimit {
    pub whitelist: Vec<i64>,
    pub max_free_messages: usize,
    pub bot_name: String,
    pub deploy_url: String,
}

/// Stops chats outside the whitelist once their history outgrows the free allowance.
pub struct UsageLimitHandler {
    executor: Arc<AgentExecutor>,
    limit: UsageLimit,
}

impl UsageLimitHandler {
    pub fn new(executor: Arc<AgentExecutor>, limit: UsageLimit) -> Self {
        Self { executor, limit }
    }

    fn limit_reply(&self) -> Vec<ReplyBlock> {
        vec![
            ReplyBlock::text(format!("Thanks for trying out {}!", self.limit.bot_name)),
            ReplyBlock::text("Please deploy your own version to continue chatting."),
            ReplyBlock::text(format!("Learn how on: {}", self.limit.deploy_url)),
        ]
    }
}

#[async_trait]
impl Handler for UsageLimitHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if self.limit.whitelist.is_empty() || self.limit.whitelist.contains(&message.chat.id) {
            return Ok(HandlerResponse::Continue);
        }

        let chat_id = message.chat.id.to_string();
        let used = match self.executor.history_len(Some(&chat_id)).await {
            Ok(used) => used,
            Err(e) => {
                warn!(error = %e, "Failed to read history size, not limiting");
                return Ok(HandlerResponse::Continue);
            }
        };

        if used > self.limit.max_free_messages {
            info!(
                used,
                max_free_messages = self.limit.max_free_messages,
                "Usage limit reached"
            );
            return Ok(HandlerResponse::Reply(self.limit_reply()));
        }
        Ok(HandlerResponse::Continue)
    }
}
