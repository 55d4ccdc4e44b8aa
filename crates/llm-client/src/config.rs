//! LLM configuration: trait and env-based implementation.

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// LLM configuration interface for OpenAI-compatible APIs.
pub trait LlmConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn model(&self) -> &str;
    fn temperature(&self) -> f32;
}

/// LLM config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub llm_model: String,
    pub llm_temperature: f32,
}

impl LlmConfig for EnvLlmConfig {
    fn api_key(&self) -> &str {
        &self.openai_api_key
    }
    fn base_url(&self) -> &str {
        &self.openai_base_url
    }
    fn model(&self) -> &str {
        &self.llm_model
    }
    fn temperature(&self) -> f32 {
        self.llm_temperature
    }
}

impl EnvLlmConfig {
    /// Load from environment variables.
    ///
    /// `MODEL` wins over `USE_GPT4`; without either the model is `gpt-3.5-turbo`.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let use_gpt4 = env::var("USE_GPT4")
            .ok()
            .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        let llm_model = env::var("MODEL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| default_model(use_gpt4).to_string());
        let llm_temperature = match env::var("TEMPERATURE") {
            Ok(raw) => raw
                .trim()
                .parse::<f32>()
                .with_context(|| format!("TEMPERATURE is not a number: {}", raw))?,
            Err(_) => DEFAULT_TEMPERATURE,
        };
        Ok(Self {
            openai_api_key,
            openai_base_url,
            llm_model,
            llm_temperature,
        })
    }
}

fn default_model(use_gpt4: bool) -> &'static str {
    if use_gpt4 {
        "gpt-4"
    } else {
        "gpt-3.5-turbo"
    }
}
