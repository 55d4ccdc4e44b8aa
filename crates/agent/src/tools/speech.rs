//! `generate_speech`: text to an MP3 voice note. Also serves as the voice tool.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use dbot_core::{MediaBlock, MediaStore};
use media_client::SpeechClient;

use crate::Tool;

pub struct SpeechTool {
    client: SpeechClient,
    store: Arc<dyn MediaStore>,
}

impl SpeechTool {
    pub fn new(client: SpeechClient, store: Arc<dyn MediaStore>) -> Self {
        Self { client, store }
    }
}

#[async_trait]
impl Tool for SpeechTool {
    fn name(&self) -> &str {
        "generate_speech"
    }

    fn description(&self) -> &str {
        "Useful when you want to send a voice message. The output is the UUID of the audio."
    }

    fn input_description(&self) -> &str {
        "The exact text to speak"
    }

    async fn run(&self, input: &str) -> Result<String> {
        let audio = self.client.synthesize(input).await?;
        let id = self
            .store
            .put(MediaBlock::from_bytes("audio/mpeg", audio))
            .await?;
        tracing::info!(voice_id = %self.client.voice_id(), media_id = %id, "Speech stored");
        Ok(id.to_string())
    }
}
