//! Web search through SerpAPI.

use anyhow::{Context, Result};
use async_trait::async_trait;
use dbot_core::mask_token;
use serde_json::Value;

use crate::Tool;

pub const NO_RESULT: &str = "No good search result found";
const DEFAULT_BASE_URL: &str = "https://serpapi.com";

/// Answers questions about current events from Google results.
pub struct SearchTool {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SearchTool {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl Tool for SearchTool {
    fn name(&self) -> &str {
        "search"
    }

    fn description(&self) -> &str {
        "Useful for when you need to answer questions about current events or facts you do not know."
    }

    fn input_description(&self) -> &str {
        "The search query"
    }

    #[tracing::instrument(skip(self))]
    async fn run(&self, input: &str) -> Result<String> {
        tracing::info!(api_key = %mask_token(&self.api_key), "SerpAPI search");
        let response = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("q", input),
                ("engine", "google"),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await
            .context("SerpAPI request failed")?;
        let status = response.status();
        let body: Value = response
            .json()
            .await
            .context("Invalid SerpAPI response")?;
        if let Some(error) = body.get("error").and_then(Value::as_str) {
            anyhow::bail!("SerpAPI error: {}", error);
        }
        if !status.is_success() {
            anyhow::bail!("SerpAPI returned {}", status);
        }
        Ok(extract_answer(&body))
    }
}

/// Picks the most direct answer out of a SerpAPI result.
///
/// Order: answer box (answer, snippet, first highlighted word), sports game spotlight,
/// knowledge graph description, first organic snippet.
pub fn extract_answer(body: &Value) -> String {
    let answer_box = match body.get("answer_box") {
        Some(Value::Array(items)) => items.first(),
        other => other,
    };
    if let Some(answer_box) = answer_box {
        if let Some(answer) = answer_box.get("answer") {
            return value_text(answer);
        }
        if let Some(snippet) = answer_box.get("snippet") {
            return value_text(snippet);
        }
        if let Some(first) = answer_box
            .get("snippet_highlighted_words")
            .and_then(|w| w.get(0))
        {
            return value_text(first);
        }
    }
    if let Some(spotlight) = body
        .get("sports_results")
        .and_then(|s| s.get("game_spotlight"))
    {
        return value_text(spotlight);
    }
    if let Some(description) = body
        .get("knowledge_graph")
        .and_then(|k| k.get("description"))
    {
        return value_text(description);
    }
    if let Some(snippet) = body
        .get("organic_results")
        .and_then(|r| r.get(0))
        .and_then(|r| r.get("snippet"))
    {
        return value_text(snippet);
    }
    NO_RESULT.to_string()
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
