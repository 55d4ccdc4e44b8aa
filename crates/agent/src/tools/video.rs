//! `video_message`: a talking-head video of the persona saying the input.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use dbot_core::{MediaBlock, MediaStore};
use media_client::TalkingVideoClient;

use crate::Tool;

pub struct VideoMessageTool {
    client: TalkingVideoClient,
    store: Arc<dyn MediaStore>,
}

impl VideoMessageTool {
    pub fn new(client: TalkingVideoClient, store: Arc<dyn MediaStore>) -> Self {
        Self { client, store }
    }
}

#[async_trait]
impl Tool for VideoMessageTool {
    fn name(&self) -> &str {
        "video_message"
    }

    fn description(&self) -> &str {
        "Useful when you want to send a video message of yourself talking. \
         The output is the UUID of the video."
    }

    fn input_description(&self) -> &str {
        "The exact text you say in the video"
    }

    async fn run(&self, input: &str) -> Result<String> {
        let url = self.client.create_video(input).await?;
        let id = self.store.put(MediaBlock::from_url("video/mp4", url)).await?;
        tracing::info!(media_id = %id, "Video stored");
        Ok(id.to_string())
    }
}
