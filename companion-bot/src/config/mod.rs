//! Bot configuration: BaseConfig (Telegram + log + DB) + CompanionConfig (persona, limits, tools).
//! LLM settings come from llm-client's `EnvLlmConfig`.

mod base;
mod bot_config;
mod companion;


pub use base::BaseConfig;
pub use bot_config::BotConfig;
pub use companion::{parse_chat_ids, CompanionConfig, HistoryStoreKind, DEFAULT_DEPLOY_URL};
