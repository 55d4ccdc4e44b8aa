//! # Companion bot
//!
//! An AI companion with a persona, reachable on Telegram or in the terminal. Messages go through
//! a handler chain (usage limit, `/start`, companion); the companion runs a function-calling agent
//! whose tools generate selfies, images, voice notes and video messages. Media UUIDs in the
//! agent's answer are resolved into media blocks before sending.

pub mod assembly;
pub mod cli;
pub mod config;
pub mod handlers;
pub mod repl;
pub mod response;
pub mod runner;

pub use assembly::{assemble, build_chain, build_executor, build_tools, Toolset};
pub use cli::{load_config, Cli, Commands};
pub use config::{BaseConfig, BotConfig, CompanionConfig, HistoryStoreKind};
pub use handlers::{CompanionHandler, StartCommandHandler, UsageLimit, UsageLimitHandler};
pub use repl::ConsoleBot;
pub use response::{is_uuid, split_response, UUID_PATTERN};
pub use runner::{run_bot, run_local_chat};
