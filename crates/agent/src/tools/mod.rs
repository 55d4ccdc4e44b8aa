//! Concrete tools.

mod image;
mod search;
mod speech;
mod video;

pub use image::ImageTool;
pub use search::{extract_answer, SearchTool, NO_RESULT};
pub use speech::SpeechTool;
pub use video::VideoMessageTool;
