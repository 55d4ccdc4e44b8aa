//! Personalities: who the bot pretends to be. Built-ins are compiled in; a custom one can be read from a file.

use std::fs;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_PERSONALITY: &str = "sacha";

const BUILTIN: &[(&str, &str)] = &[
    ("sacha", include_str!("../personalities/sacha.txt")),
    ("luna", include_str!("../personalities/luna.txt")),
    ("jack", include_str!("../personalities/jack.txt")),
];

#[derive(Debug, Error)]
pub enum PersonalityError {
    #[error("Unknown personality '{name}'. Pick one of: {available}")]
    Unknown { name: String, available: String },
    #[error("Failed to read personality file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Personality file {0} is empty")]
    Empty(String),
}

/// Built-in personality text by name (case-insensitive, surrounding whitespace ignored).
pub fn get_personality(name: &str) -> Result<&'static str, PersonalityError> {
    let wanted = name.trim();
    BUILTIN
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(wanted))
        .map(|(_, text)| text.trim())
        .ok_or_else(|| PersonalityError::Unknown {
            name: wanted.to_string(),
            available: available_personalities().join(", "),
        })
}

/// Names of the built-in personalities.
pub fn available_personalities() -> Vec<&'static str> {
    BUILTIN.iter().map(|(n, _)| *n).collect()
}

/// Reads a custom personality from a text file.
pub fn load_personality_file(path: impl AsRef<Path>) -> Result<String, PersonalityError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| PersonalityError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let text = text.trim();
    if text.is_empty() {
        return Err(PersonalityError::Empty(path.display().to_string()));
    }
    Ok(text.to_string())
}
