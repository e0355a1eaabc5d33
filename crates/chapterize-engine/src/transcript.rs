use std::path::Path;

use serde_json::Value;

use chapterize_core::{ChatMessage, Role};

#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("failed to read transcript: {0}")]
    Io(String),
    #[error("transcript is not valid JSON: {0}")]
    Json(String),
    #[error("transcript must be a JSON array of messages")]
    NotAnArray,
    #[error("message {index} is missing '{field}'")]
    MissingField { index: usize, field: &'static str },
    #[error("message {index} has unrecognized role {role:?}")]
    UnknownRole { index: usize, role: String },
}

/// Load a transcript file: a JSON array of `{role, content}` objects.
/// Shape problems are reported with the offending message index, before
/// the engine sees anything.
pub fn load_transcript(path: &Path) -> Result<Vec<ChatMessage>, TranscriptError> {
    let text = std::fs::read_to_string(path).map_err(|e| TranscriptError::Io(e.to_string()))?;
    parse_transcript(&text)
}

pub fn parse_transcript(text: &str) -> Result<Vec<ChatMessage>, TranscriptError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| TranscriptError::Json(e.to_string()))?;
    let entries = value.as_array().ok_or(TranscriptError::NotAnArray)?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let role_value = entry
                .get("role")
                .and_then(Value::as_str)
                .ok_or(TranscriptError::MissingField {
                    index,
                    field: "role",
                })?;
            let content = entry
                .get("content")
                .and_then(Value::as_str)
                .ok_or(TranscriptError::MissingField {
                    index,
                    field: "content",
                })?;

            let role = match role_value {
                "user" => Role::User,
                "assistant" => Role::Assistant,
                other => {
                    return Err(TranscriptError::UnknownRole {
                        index,
                        role: other.to_string(),
                    })
                }
            };

            Ok(ChatMessage {
                role,
                content: content.to_string(),
            })
        })
        .collect()
}
