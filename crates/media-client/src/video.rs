//! D-ID talking-head video client: create a talk, then poll until it is rendered.

use std::time::Duration;

use anyhow::{Context, Result};
use dbot_core::mask_token;
use serde::Deserialize;
use serde_json::json;

const DEFAULT_BASE_URL: &str = "https://api.d-id.com";

#[derive(Debug, Deserialize)]
struct CreatedTalk {
    id: String,
}

#[derive(Debug, Deserialize)]
struct TalkStatus {
    status: String,
    #[serde(default)]
    result_url: Option<String>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

/// Renders a video of the avatar at `source_url` speaking a text script.
#[derive(Clone)]
pub struct TalkingVideoClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    source_url: String,
    poll_interval: Duration,
    max_polls: u32,
}

impl TalkingVideoClient {
    pub fn new(api_key: String, source_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            source_url,
            poll_interval: Duration::from_secs(2),
            max_polls: 60,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Delay between status polls and the number of polls before giving up.
    pub fn with_polling(mut self, interval: Duration, max_polls: u32) -> Self {
        self.poll_interval = interval;
        self.max_polls = max_polls;
        self
    }

    /// Returns the URL of the rendered MP4.
    #[tracing::instrument(skip(self, script), fields(script_len = script.len()))]
    pub async fn create_video(&self, script: &str) -> Result<String> {
        tracing::info!(
            source_url = %self.source_url,
            api_key = %mask_token(&self.api_key),
            "D-ID talk request"
        );

        let response = self
            .http
            .post(format!("{}/talks", self.base_url))
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .json(&json!({
                "source_url": self.source_url,
                "script": {"type": "text", "input": script},
            }))
            .send()
            .await
            .context("D-ID create request failed")?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("D-ID returned {}: {}", status, body);
        }
        let talk: CreatedTalk = response
            .json()
            .await
            .context("Invalid D-ID create response")?;
        tracing::info!(talk_id = %talk.id, "D-ID talk created");

        self.wait_for_result(&talk.id).await
    }

    async fn wait_for_result(&self, talk_id: &str) -> Result<String> {
        let url = format!("{}/talks/{}", self.base_url, talk_id);
        for attempt in 1..=self.max_polls {
            let response = self
                .http
                .get(&url)
                .header(reqwest::header::AUTHORIZATION, self.auth_header())
                .send()
                .await
                .context("D-ID status request failed")?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                anyhow::bail!("D-ID status returned {}: {}", status, body);
            }
            let talk: TalkStatus = response
                .json()
                .await
                .context("Invalid D-ID status response")?;
            tracing::debug!(talk_id, attempt, status = %talk.status, "D-ID talk status");

            match talk.status.as_str() {
                "done" => {
                    return talk
                        .result_url
                        .ok_or_else(|| anyhow::anyhow!("D-ID talk {} done without result_url", talk_id));
                }
                "error" | "rejected" => {
                    anyhow::bail!(
                        "D-ID talk {} {}: {}",
                        talk_id,
                        talk.status,
                        talk.error.map(|e| e.to_string()).unwrap_or_default()
                    );
                }
                _ => tokio::time::sleep(self.poll_interval).await,
            }
        }
        anyhow::bail!(
            "D-ID talk {} not ready after {} polls",
            talk_id,
            self.max_polls
        )
    }

    fn auth_header(&self) -> String {
        format!("Basic {}", self.api_key)
    }
}
