//! OpenAI image generation client.

use anyhow::Result;
use async_openai::{
    config::OpenAIConfig,
    types::{CreateImageRequestArgs, Image, ImageModel, ImageResponseFormat, ImageSize},
    Client,
};
use dbot_core::mask_token;
use std::sync::Arc;

/// OpenAI image generation client (`dall-e-3`, 1024x1024 by default).
#[derive(Clone)]
pub struct ImageGenerationClient {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    size: ImageSize,
    api_key: String,
}

impl ImageGenerationClient {
    pub fn new(api_key: String) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key.clone());
        Self::from_parts(config, api_key)
    }

    /// Client for a custom base URL (OpenAI-compatible services).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key.clone())
            .with_api_base(base_url);
        Self::from_parts(config, api_key)
    }

    fn from_parts(config: OpenAIConfig, api_key: String) -> Self {
        Self {
            client: Arc::new(Client::with_config(config)),
            model: "dall-e-3".to_string(),
            size: ImageSize::S1024x1024,
            api_key,
        }
    }

    /// `dall-e-2` or `dall-e-3`.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = size;
        self
    }

    /// Generates one image for `prompt` and returns its URL.
    #[tracing::instrument(skip(self))]
    pub async fn generate_image(&self, prompt: &str) -> Result<String> {
        tracing::info!(
            model = %self.model,
            size = ?self.size,
            prompt_preview = %prompt.chars().take(100).collect::<String>(),
            api_key = %mask_token(&self.api_key),
            "OpenAI image generation request"
        );

        let request = CreateImageRequestArgs::default()
            .prompt(prompt)
            .model(ImageModel::Other(self.model.clone()))
            .size(self.size)
            .response_format(ImageResponseFormat::Url)
            .n(1)
            .build()?;

        let response = self.client.images().create(request).await?;

        let url = response.data.iter().find_map(|image| match image.as_ref() {
            Image::Url { url, .. } => Some(url.clone()),
            _ => None,
        });
        match url {
            Some(url) => {
                tracing::info!(image_url = %url, "OpenAI image generation completed");
                Ok(url)
            }
            None => anyhow::bail!("No image URL in response"),
        }
    }
}
