//! # dbot-core
//!
//! Core types and traits for the companion bot: [`Bot`], [`Handler`], [`MediaStore`], message and
//! reply-block types, tracing initialization and token masking. Transport-agnostic; used by
//! dbot-telegram, handler-chain, the agent tools and the application crate.

pub mod block;
pub mod bot;
pub mod error;
pub mod logger;
pub mod media_store;
pub mod secret;
pub mod types;

pub use block::{MediaBlock, MediaContent, MediaKind, ReplyBlock};
pub use bot::Bot;
pub use error::{DbotError, Result};
pub use logger::{init_console_tracing, init_tracing};
pub use media_store::{InMemoryMediaStore, MediaStore, DEFAULT_MEDIA_CAPACITY};
pub use secret::mask_token;
pub use types::{Chat, Handler, HandlerResponse, Message, ToCoreMessage, ToCoreUser, User};
