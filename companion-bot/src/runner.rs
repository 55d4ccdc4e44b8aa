//! Entry points: Telegram bot and local chat.

use anyhow::Result;
use dbot_core::{init_console_tracing, init_tracing, mask_token};
use dbot_telegram::{run_repl, TelegramConfig};
use tracing::{info, instrument};

use crate::assembly::assemble;
use crate::config::BotConfig;
use crate::repl::{run_chat, ConsoleBot};

/// Main entry: validate config, init logging, assemble the chain, then run the Telegram REPL.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    let token = config.base().require_token()?.to_string();
    init_tracing(config.log_file())?;

    info!(
        database_url = %config.database_url(),
        bot_token = %mask_token(&token),
        "Initializing bot"
    );

    let chain = assemble(&config).await?;
    let bot = TelegramConfig::with_token(token)
        .with_api_url(config.base().telegram_api_url.clone())
        .build_bot()?;

    info!(handlers = chain.len(), "Bot started successfully");
    run_repl(bot, chain).await
}

/// Local chat on stdin/stdout; logs go to stderr.
pub async fn run_local_chat(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_console_tracing()?;
    let chain = assemble(&config).await?;
    run_chat(chain, ConsoleBot::new(config.companion().media_dir.clone())).await
}
