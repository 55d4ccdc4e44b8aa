//! # dbot-telegram
//!
//! Telegram transport layer: adapters, [`dbot_core::Bot`] implementation (text and media), minimal
//! config, REPL runner. Handles only Telegram connectivity and handler-chain execution; no agent logic.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{to_input_file, TelegramBotAdapter};
pub use config::TelegramConfig;
pub use runner::run_repl;
