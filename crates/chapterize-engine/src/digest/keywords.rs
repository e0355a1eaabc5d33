use chapterize_core::{ChatMessage, LlmError};
use chapterize_llm::{Completer, CompletionRequest};

const KEYWORD_MAX_TOKENS: u32 = 200;

/// Extract keywords chunk by chunk. The assistant turn is prefilled with
/// `Keywords:` and generation stops at `---`, so the reply is just the
/// keyword lines.
pub async fn extract_keywords(
    messages: &[ChatMessage],
    completer: &dyn Completer,
    chunk_size: usize,
) -> Result<Vec<String>, LlmError> {
    let mut all_keywords = Vec::new();

    for chunk in messages.chunks(chunk_size.max(1)) {
        let request = CompletionRequest {
            prompt: keyword_prompt(chunk),
            prefill: Some("Keywords:".into()),
            stop_sequences: vec!["---".into()],
            max_tokens: KEYWORD_MAX_TOKENS,
        };
        let text = completer.complete(&request).await?;
        all_keywords.extend(parse_keywords(&text));
    }

    Ok(all_keywords)
}

fn keyword_prompt(chunk: &[ChatMessage]) -> String {
    let conversation: Vec<String> = chunk
        .iter()
        .map(|msg| format!("{}: {}", msg.role, msg.content))
        .collect();

    format!(
        "Extract 3-5 important keywords or short phrases from this conversation chunk.\n\
         Return only the keywords, one per line, no numbering or bullets.\n\
         End with --- when done.\n\
         \n\
         Conversation:\n\
         {}",
        conversation.join("\n")
    )
}

fn parse_keywords(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
