//! Agent answer post-processing: media UUIDs embedded in the text become separate segments.

use regex::Regex;
use std::sync::LazyLock;
use uuid::{Uuid, Variant, Version};

/// Anything shaped like a hyphenated UUID. Whether it really is one is decided by [`is_uuid`].
pub const UUID_PATTERN: &str =
    r"([0-9A-Za-z]{8}-[0-9A-Za-z]{4}-[0-9A-Za-z]{4}-[0-9A-Za-z]{4}-[0-9A-Za-z]{12})";

static UUID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(UUID_PATTERN).expect("uuid regex"));
static LEADING_NON_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\W+").expect("leading non-word regex"));

/// Splits `text` around UUID-shaped tokens, keeping the tokens as their own segments.
///
/// Leading non-word characters are stripped from every segment and empty segments are dropped,
/// so `"Here you go: <uuid>. Enjoy!"` becomes `["Here you go: ", "<uuid>", "Enjoy!"]`.
pub fn split_response(text: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut last = 0;
    for m in UUID_RE.find_iter(text) {
        pieces.push(&text[last..m.start()]);
        pieces.push(m.as_str());
        last = m.end();
    }
    pieces.push(&text[last..]);

    pieces
        .into_iter()
        .map(|piece| LEADING_NON_WORD_RE.replace(piece, "").into_owned())
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// True for a canonical, hyphenated version-4 UUID (case-insensitive).
pub fn is_uuid(s: &str) -> bool {
    let lower = s.to_lowercase();
    match Uuid::parse_str(&lower) {
        Ok(id) => {
            id.hyphenated().to_string() == lower
                && id.get_version() == Some(Version::Random)
                && id.get_variant() == Variant::RFC4122
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_one_segment() {
        assert_eq!(split_response("Hi there!"), vec!["Hi there!"]);
        assert!(split_response("").is_empty());
        assert!(split_response("  ...").is_empty());
    }

    #[test]
    fn test_is_uuid_requires_v4() {
        assert!(is_uuid("3f2b8c1e-9a4d-4e6f-8b7a-1c2d3e4f5a6b"));
        assert!(is_uuid("3F2B8C1E-9A4D-4E6F-8B7A-1C2D3E4F5A6B"));
        // version 1
        assert!(!is_uuid("3f2b8c1e-9a4d-1e6f-8b7a-1c2d3e4f5a6b"));
        // bad variant
        assert!(!is_uuid("3f2b8c1e-9a4d-4e6f-0b7a-1c2d3e4f5a6b"));
        assert!(!is_uuid("3f2b8c1e9a4d4e6f8b7a1c2d3e4f5a6b"));
        assert!(!is_uuid("zzzzzzzz-zzzz-4zzz-8zzz-zzzzzzzzzzzz"));
    }
}
