//! Companion config: persona, usage limits, memory and media tool credentials.

use anyhow::{Context, Result};
use prompt::{get_personality, load_personality_file, DEFAULT_PERSONALITY};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_DEPLOY_URL: &str = "https://github.com/caiuschou/telegram-bot";

/// Where conversation history lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryStoreKind {
    Sqlite,
    Memory,
}

impl FromStr for HistoryStoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => anyhow::bail!("HISTORY_STORE must be 'sqlite' or 'memory', got '{}'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompanionConfig {
    /// PERSONALITY: built-in personality name.
    pub personality: String,
    /// PERSONALITY_FILE: custom personality text; wins over `personality`.
    pub personality_file: Option<PathBuf>,
    pub reply_language: Option<String>,
    /// BOT_NAME: shown in the usage-limit reply.
    pub bot_name: Option<String>,
    /// CHAT_IDS: chats never limited. Empty disables the limiter.
    pub chat_ids: Vec<i64>,
    pub max_free_messages: usize,
    pub deploy_url: String,
    pub memory_window_size: usize,
    pub agent_max_iterations: usize,
    pub history_store: HistoryStoreKind,
    pub selfie_prompt: Option<String>,
    pub elevenlabs_api_key: Option<String>,
    pub elevenlabs_voice_id: Option<String>,
    pub serpapi_api_key: Option<String>,
    pub did_api_key: Option<String>,
    pub did_source_url: Option<String>,
    /// MEDIA_DIR: where the local chat writes generated media bytes.
    pub media_dir: PathBuf,
}

impl CompanionConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            personality: optional("PERSONALITY").unwrap_or_else(|| DEFAULT_PERSONALITY.to_string()),
            personality_file: optional("PERSONALITY_FILE").map(PathBuf::from),
            reply_language: optional("REPLY_LANGUAGE"),
            bot_name: optional("BOT_NAME"),
            chat_ids: parse_chat_ids(&env::var("CHAT_IDS").unwrap_or_default())?,
            max_free_messages: number("MAX_FREE_MESSAGES", 10)?,
            deploy_url: optional("DEPLOY_URL").unwrap_or_else(|| DEFAULT_DEPLOY_URL.to_string()),
            memory_window_size: number("MEMORY_WINDOW_SIZE", 10)?,
            agent_max_iterations: number("AGENT_MAX_ITERATIONS", 5)?,
            history_store: optional("HISTORY_STORE")
                .map(|s| s.parse::<HistoryStoreKind>())
                .transpose()?
                .unwrap_or(HistoryStoreKind::Sqlite),
            selfie_prompt: optional("SELFIE_PROMPT"),
            elevenlabs_api_key: optional("ELEVENLABS_API_KEY"),
            elevenlabs_voice_id: optional("ELEVENLABS_VOICE_ID"),
            serpapi_api_key: optional("SERPAPI_API_KEY"),
            did_api_key: optional("DID_API_KEY"),
            did_source_url: optional("DID_SOURCE_URL"),
            media_dir: optional("MEDIA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./data/media")),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.personality_file.is_none() {
            get_personality(&self.personality)?;
        }
        if self.agent_max_iterations == 0 {
            anyhow::bail!("AGENT_MAX_ITERATIONS must be at least 1");
        }
        Ok(())
    }

    /// Personality text: the custom file when set, else the built-in personality.
    pub fn personality_text(&self) -> Result<String> {
        match &self.personality_file {
            Some(path) => Ok(load_personality_file(path)?),
            None => Ok(get_personality(&self.personality)?.to_string()),
        }
    }

    /// Configured bot name, else `{Personality}GPT`.
    pub fn bot_name(&self) -> String {
        if let Some(name) = &self.bot_name {
            return name.clone();
        }
        format!("{}GPT", capitalize(self.personality.trim()))
    }

    /// Appearance prefix for selfies.
    pub fn selfie_prompt(&self) -> String {
        self.selfie_prompt.clone().unwrap_or_else(|| {
            format!(
                "A realistic smartphone selfie of {}, natural light, candid",
                capitalize(self.personality.trim())
            )
        })
    }

    /// ElevenLabs key and voice, when both are set.
    pub fn voice(&self) -> Option<(&str, &str)> {
        Some((
            self.elevenlabs_api_key.as_deref()?,
            self.elevenlabs_voice_id.as_deref()?,
        ))
    }

    /// D-ID key and avatar URL, when both are set.
    pub fn video(&self) -> Option<(&str, &str)> {
        Some((self.did_api_key.as_deref()?, self.did_source_url.as_deref()?))
    }
}

/// Comma-separated chat ids; blanks are ignored, anything else must be an integer.
pub fn parse_chat_ids(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .with_context(|| format!("CHAT_IDS entry is not a chat id: '{}'", s))
        })
        .collect()
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.trim().is_empty())
}

fn number(key: &str, default: usize) -> Result<usize> {
    match optional(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} is not a number: {}", key, raw)),
        None => Ok(default),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
