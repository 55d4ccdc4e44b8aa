//! BotConfig: BaseConfig + CompanionConfig + LLM config. Use load() for env-based loading.

use anyhow::Result;
use llm_client::EnvLlmConfig;

use super::{BaseConfig, CompanionConfig};

pub struct BotConfig {
    pub base: BaseConfig,
    pub companion: CompanionConfig,
    pub llm: EnvLlmConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let companion = CompanionConfig::from_env()?;
        let llm = EnvLlmConfig::from_env()?;
        Ok(Self {
            base,
            companion,
            llm,
        })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.companion.validate()
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn companion(&self) -> &CompanionConfig {
        &self.companion
    }
    pub fn llm(&self) -> &EnvLlmConfig {
        &self.llm
    }

    pub fn database_url(&self) -> &str {
        &self.base.database_url
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
}
