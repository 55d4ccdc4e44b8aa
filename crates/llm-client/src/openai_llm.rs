//! OpenAI implementation of [`LlmClient`](crate::LlmClient).

use std::sync::Arc;

use anyhow::Result;
use async_openai::{config::OpenAIConfig, types::CreateChatCompletionRequestArgs, Client};
use async_trait::async_trait;
use dbot_core::mask_token;
use prompt::ChatMessage;

use crate::config::DEFAULT_TEMPERATURE;
use crate::{
    chat_message_to_openai, tool_calls_from_openai, tool_spec_to_openai, LlmClient, LlmConfig,
    LlmReply, ToolSpec,
};

/// OpenAI chat client with tool calling.
#[derive(Clone)]
pub struct OpenAILlmClient {
    client: Arc<Client<OpenAIConfig>>,
    /// Kept only for masked logging.
    api_key: String,
    model: String,
    temperature: f32,
}

impl OpenAILlmClient {
    /// Client for the default API base with model `gpt-3.5-turbo`.
    pub fn new(api_key: String) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key.clone());
        Self {
            client: Arc::new(Client::with_config(config)),
            api_key,
            model: "gpt-3.5-turbo".to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Client for a custom base URL (proxies or OpenAI-compatible endpoints).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key.clone())
            .with_api_base(base_url);
        Self {
            client: Arc::new(Client::with_config(config)),
            api_key,
            model: "gpt-3.5-turbo".to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Builds a client from any [`LlmConfig`].
    pub fn from_config(config: &dyn LlmConfig) -> Self {
        Self::with_base_url(config.api_key().to_string(), config.base_url().to_string())
            .with_model(config.model())
            .with_temperature(config.temperature())
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    async fn chat(&self, messages: &[ChatMessage], tools: &[ToolSpec]) -> Result<LlmReply> {
        tracing::info!(
            model = %self.model,
            message_count = messages.len(),
            tool_count = tools.len(),
            api_key = %mask_token(&self.api_key),
            "OpenAI chat request"
        );

        let openai_messages = messages
            .iter()
            .map(chat_message_to_openai)
            .collect::<Result<Vec<_>>>()?;

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.as_str())
            .messages(openai_messages)
            .temperature(self.temperature);
        if !tools.is_empty() {
            let openai_tools = tools
                .iter()
                .map(tool_spec_to_openai)
                .collect::<Result<Vec<_>>>()?;
            args.tools(openai_tools);
        }
        let request = args.build()?;

        if let Ok(json) = serde_json::to_string(&request) {
            tracing::debug!(request_json = %json, "OpenAI chat request JSON");
        }

        let response = self.client.chat().create(request).await?;

        if let Some(ref u) = response.usage {
            tracing::info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "OpenAI chat usage"
            );
        }

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("No response from OpenAI"))?;
        let tool_calls = choice
            .message
            .tool_calls
            .as_deref()
            .map(tool_calls_from_openai)
            .unwrap_or_default();
        Ok(LlmReply {
            content: choice.message.content,
            tool_calls,
        })
    }
}
