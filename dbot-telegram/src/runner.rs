//! REPL runner: converts teloxide messages to core::Message, runs the HandlerChain, and emits the
//! reply blocks through [`TelegramBotAdapter`].

use anyhow::Result;
use dbot_core::{Bot as CoreBot, HandlerResponse, ToCoreMessage};
use handler_chain::HandlerChain;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::ChatAction;
use tracing::{debug, error, info, instrument, warn};

use super::adapters::TelegramMessageWrapper;
use super::bot_adapter::TelegramBotAdapter;

/// Starts the long-polling REPL. Each message is handled in its own task so a slow agent run
/// does not block other chats.
#[instrument(skip(bot, handler_chain))]
pub async fn run_repl(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    if let Ok(me) = bot.get_me().await {
        if let Some(username) = &me.user.username {
            info!(username = %username, "Bot identity confirmed");
        }
    }

    let emitter = Arc::new(TelegramBotAdapter::new(bot.clone()));
    let chain = handler_chain;
    teloxide::repl(bot, move |bot: Bot, msg: teloxide::types::Message| {
        let chain = chain.clone();
        let emitter = emitter.clone();

        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();
            info!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                message_type = %core_msg.message_type,
                content_len = core_msg.content.len(),
                "Received message"
            );
            debug!(chat_id = core_msg.chat.id, content = %core_msg.content, "Message content");

            tokio::spawn(async move {
                if let Err(e) = bot
                    .send_chat_action(msg.chat.id, ChatAction::Typing)
                    .await
                {
                    warn!(error = %e, "Failed to send typing action");
                }

                match chain.handle(&core_msg).await {
                    Ok(HandlerResponse::Reply(blocks)) => {
                        info!(
                            chat_id = core_msg.chat.id,
                            block_count = blocks.len(),
                            "step: emitting reply blocks"
                        );
                        if let Err(e) = emitter.send_blocks(&core_msg.chat, &blocks).await {
                            error!(error = %e, chat_id = core_msg.chat.id, "Failed to emit reply");
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
                    }
                }
            });

            Ok(())
        }
    })
    .await;

    Ok(())
}
