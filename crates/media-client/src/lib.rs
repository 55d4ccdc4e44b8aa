//! # Media clients
//!
//! HTTP clients that turn text into media for the companion's tools:
//!
//! - [`ImageGenerationClient`]: OpenAI image generation, returns an image URL.
//! - [`SpeechClient`]: ElevenLabs text-to-speech, returns MP3 bytes.
//! - [`TalkingVideoClient`]: D-ID talking-head video, returns the rendered video URL.
//!
//! Every client accepts a custom base URL so it can point at proxies or a local mock server.

mod image;
mod speech;
mod video;

pub use image::ImageGenerationClient;
pub use speech::{SpeechClient, DEFAULT_SPEECH_MODEL};
pub use video::TalkingVideoClient;
