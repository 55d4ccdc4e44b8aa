//! # Agent
//!
//! The companion's reasoning loop. The model decides which tool to call through native function
//! calling; [`AgentExecutor`] runs the calls, feeds observations back and keeps per-chat memory.
//!
//! Media tools store what they generate in a [`dbot_core::MediaStore`] and answer with the media
//! UUID, which the model is instructed to copy into its final answer.

mod executor;
mod tool;
pub mod tools;

pub use executor::{AgentExecutor, ITERATION_LIMIT_ANSWER};
pub use tool::{parse_tool_input, Tool};
pub use tools::{ImageTool, SearchTool, SpeechTool, VideoMessageTool};
