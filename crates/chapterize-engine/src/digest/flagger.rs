use serde::Serialize;

use chapterize_core::{ChatMessage, Role};

/// A transcript message that matched at least one keyword.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct FlaggedMessage {
    pub index: usize,
    pub role: Role,
    pub content: String,
    pub matched_keywords: Vec<String>,
}

/// Keep only the messages whose content contains any keyword,
/// case-insensitively, recording which keywords matched.
pub fn flag_messages(messages: &[ChatMessage], keywords: &[String]) -> Vec<FlaggedMessage> {
    let mut flagged = Vec::new();

    for (index, msg) in messages.iter().enumerate() {
        let content_lower = msg.content.to_lowercase();
        let matched: Vec<String> = keywords
            .iter()
            .filter(|keyword| content_lower.contains(&keyword.to_lowercase()))
            .cloned()
            .collect();

        if !matched.is_empty() {
            flagged.push(FlaggedMessage {
                index,
                role: msg.role,
                content: msg.content.clone(),
                matched_keywords: matched,
            });
        }
    }

    flagged
}
