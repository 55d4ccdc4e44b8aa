use async_trait::async_trait;
use dbot_core::{Handler, HandlerResponse, Message, ReplyBlock, Result};

pub const NEW_CONVERSATION: &str = "New conversation started.";

/// Answers `/start` (also `/start@botname`). History is kept.
pub struct StartCommandHandler;

fn is_start_command(content: &str) -> bool {
    match content.split_whitespace().next() {
        Some(command) => command == "/start" || command.starts_with("/start@"),
        None => false,
    }
}

#[async_trait]
impl Handler for StartCommandHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if is_start_command(&message.content) {
            return Ok(HandlerResponse::Reply(vec![ReplyBlock::text(NEW_CONVERSATION)]));
        }
        Ok(HandlerResponse::Continue)
    }
}
