//! Reply blocks: the unit of bot output. A reply is an ordered list of text and media blocks.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where the media bytes live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaContent {
    /// Publicly reachable URL (e.g. an image generation result).
    Url(String),
    /// Raw bytes held in memory (e.g. synthesized speech).
    Bytes(Vec<u8>),
}

/// Coarse media category, derived from the MIME type; decides how a transport sends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Audio,
    Video,
    Other,
}

/// Generated media referenced by an opaque id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaBlock {
    pub id: Uuid,
    pub mime_type: String,
    pub content: MediaContent,
}

impl MediaBlock {
    /// New block with a fresh v4 id pointing at a URL.
    pub fn from_url(mime_type: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            mime_type: mime_type.into(),
            content: MediaContent::Url(url.into()),
        }
    }

    /// New block with a fresh v4 id holding raw bytes.
    pub fn from_bytes(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            mime_type: mime_type.into(),
            content: MediaContent::Bytes(bytes),
        }
    }

    pub fn kind(&self) -> MediaKind {
        let mime = self.mime_type.to_ascii_lowercase();
        if mime.starts_with("image/") {
            MediaKind::Image
        } else if mime.starts_with("audio/") {
            MediaKind::Audio
        } else if mime.starts_with("video/") {
            MediaKind::Video
        } else {
            MediaKind::Other
        }
    }

    /// File extension for uploads and local exports.
    pub fn file_extension(&self) -> &'static str {
        match self.mime_type.to_ascii_lowercase().as_str() {
            "image/png" => "png",
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            "audio/mpeg" | "audio/mp3" => "mp3",
            "audio/ogg" => "ogg",
            "audio/wav" | "audio/x-wav" => "wav",
            "video/mp4" => "mp4",
            "video/webm" => "webm",
            _ => "bin",
        }
    }

    /// `<uuid>.<ext>`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.id, self.file_extension())
    }
}

/// One outbound block: text or media.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplyBlock {
    Text(String),
    Media(MediaBlock),
}

impl ReplyBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ReplyBlock::Text(text.into())
    }

    pub fn is_text(&self) -> bool {
        matches!(self, ReplyBlock::Text(_))
    }

    /// Text body, if this is a text block.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ReplyBlock::Text(t) => Some(t.as_str()),
            ReplyBlock::Media(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_from_mime() {
        assert_eq!(MediaBlock::from_url("image/png", "u").kind(), MediaKind::Image);
        assert_eq!(MediaBlock::from_bytes("audio/mpeg", vec![]).kind(), MediaKind::Audio);
        assert_eq!(MediaBlock::from_url("VIDEO/MP4", "u").kind(), MediaKind::Video);
        assert_eq!(MediaBlock::from_url("application/pdf", "u").kind(), MediaKind::Other);
    }

    #[test]
    fn test_file_name_uses_id_and_extension() {
        let block = MediaBlock::from_bytes("audio/mpeg", vec![1, 2, 3]);
        assert_eq!(block.file_name(), format!("{}.mp3", block.id));
        assert_eq!(MediaBlock::from_url("text/plain", "u").file_extension(), "bin");
    }

    #[test]
    fn test_fresh_ids_are_v4() {
        let block = MediaBlock::from_url("image/png", "https://example.com/a.png");
        assert_eq!(block.id.get_version_num(), 4);
    }

    #[test]
    fn test_reply_block_text_accessors() {
        let t = ReplyBlock::text("hello");
        assert!(t.is_text());
        assert_eq!(t.as_text(), Some("hello"));
        let m = ReplyBlock::Media(MediaBlock::from_url("image/png", "u"));
        assert!(!m.is_text());
        assert_eq!(m.as_text(), None);
    }
}
