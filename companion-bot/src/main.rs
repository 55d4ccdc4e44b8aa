//! Binary for the companion bot: `run` (Telegram) or `chat` (terminal).

use anyhow::Result;
use clap::Parser;
use companion_bot::{load_config, run_bot, run_local_chat, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token, personality } => {
            let config = load_config(token, personality)?;
            run_bot(config).await
        }
        Commands::Chat { personality } => {
            let config = load_config(None, personality)?;
            run_local_chat(config).await
        }
    }
}
