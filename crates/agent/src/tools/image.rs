//! Image tools: `selfie` (the persona's appearance + the scene) and `generate_image`.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use dbot_core::{MediaBlock, MediaStore};
use media_client::ImageGenerationClient;

use crate::Tool;

pub struct ImageTool {
    name: String,
    description: String,
    input_description: String,
    /// Prepended to every prompt, e.g. the persona's appearance.
    prompt_prefix: Option<String>,
    client: ImageGenerationClient,
    store: Arc<dyn MediaStore>,
}

impl ImageTool {
    /// Picture of the persona; `appearance` describes how they look.
    pub fn selfie(
        client: ImageGenerationClient,
        store: Arc<dyn MediaStore>,
        appearance: impl Into<String>,
    ) -> Self {
        let appearance = appearance.into();
        Self {
            name: "selfie".to_string(),
            description: "Useful when you want to send a selfie or a picture of yourself. \
                          The output is the UUID of the generated image."
                .to_string(),
            input_description: "Where you are and what you are doing, e.g. 'at the beach, smiling'"
                .to_string(),
            prompt_prefix: Some(appearance).filter(|p| !p.trim().is_empty()),
            client,
            store,
        }
    }

    /// Any picture the conversation asks for.
    pub fn generate_image(client: ImageGenerationClient, store: Arc<dyn MediaStore>) -> Self {
        Self {
            name: "generate_image".to_string(),
            description: "Useful when you need to generate an image of something. \
                          The output is the UUID of the generated image."
                .to_string(),
            input_description: "A detailed description of the image".to_string(),
            prompt_prefix: None,
            client,
            store,
        }
    }

    fn prompt_for(&self, input: &str) -> String {
        match &self.prompt_prefix {
            Some(prefix) => format!("{}, {}", prefix.trim(), input.trim()),
            None => input.trim().to_string(),
        }
    }
}

#[async_trait]
impl Tool for ImageTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn input_description(&self) -> &str {
        &self.input_description
    }

    async fn run(&self, input: &str) -> Result<String> {
        let url = self.client.generate_image(&self.prompt_for(input)).await?;
        let id = self.store.put(MediaBlock::from_url("image/png", url)).await?;
        tracing::info!(tool = %self.name, media_id = %id, "Image stored");
        Ok(id.to_string())
    }
}
