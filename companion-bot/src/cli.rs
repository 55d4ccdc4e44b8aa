//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::BotConfig;

#[derive(Parser)]
#[command(name = "companion-bot")]
#[command(about = "AI companion Telegram bot", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
        /// Built-in personality; overrides PERSONALITY.
        #[arg(short, long)]
        personality: Option<String>,
    },
    /// Chat with the companion in the terminal.
    Chat {
        #[arg(short, long)]
        personality: Option<String>,
    },
}

/// Load BotConfig from environment. CLI values override their env counterparts.
pub fn load_config(token: Option<String>, personality: Option<String>) -> Result<BotConfig> {
    let mut config = BotConfig::load(token)?;
    if let Some(personality) = personality {
        config.companion.personality = personality;
        config.companion.personality_file = None;
    }
    Ok(config)
}
