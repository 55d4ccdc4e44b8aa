//! ElevenLabs text-to-speech client.

use anyhow::{Context, Result};
use dbot_core::mask_token;
use serde::Serialize;

pub const DEFAULT_SPEECH_MODEL: &str = "eleven_monolingual_v1";
const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";

#[derive(Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

/// Synthesizes speech with one ElevenLabs voice. Output is `audio/mpeg`.
#[derive(Clone)]
pub struct SpeechClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    voice_id: String,
    model_id: String,
}

impl SpeechClient {
    pub fn new(api_key: String, voice_id: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            voice_id,
            model_id: DEFAULT_SPEECH_MODEL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    pub fn voice_id(&self) -> &str {
        &self.voice_id
    }

    /// Returns the MP3 bytes for `text`.
    #[tracing::instrument(skip(self, text), fields(voice_id = %self.voice_id, text_len = text.len()))]
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let url = format!("{}/v1/text-to-speech/{}", self.base_url, self.voice_id);
        tracing::info!(
            model_id = %self.model_id,
            api_key = %mask_token(&self.api_key),
            "ElevenLabs speech request"
        );

        let response = self
            .http
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .header(reqwest::header::ACCEPT, "audio/mpeg")
            .json(&SpeechRequest {
                text,
                model_id: &self.model_id,
            })
            .send()
            .await
            .context("ElevenLabs request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("ElevenLabs returned {}: {}", status, body);
        }

        let bytes = response
            .bytes()
            .await
            .context("Failed to read ElevenLabs audio")?;
        tracing::info!(bytes = bytes.len(), "ElevenLabs speech completed");
        Ok(bytes.to_vec())
    }
}
