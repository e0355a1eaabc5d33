//! Keyword-driven context digest: the older, simpler pipeline that
//! complements topic segmentation. Keywords are pulled per chunk, messages
//! matching any keyword are flagged, and the flagged excerpts are
//! synthesized into a structured Markdown summary suitable for seeding a
//! fresh conversation.

mod flagger;
mod keywords;

pub use flagger::{flag_messages, FlaggedMessage};
pub use keywords::extract_keywords;

use chapterize_core::{ChatMessage, LlmError};
use chapterize_llm::{Completer, CompletionRequest};

pub const DEFAULT_CHUNK_SIZE: usize = 10;
const SUMMARY_MAX_TOKENS: u32 = 1000;

const NO_CONTEXT_NOTICE: &str = "No important context found in the transcript.";

/// Run the full digest pipeline over a transcript.
pub async fn summarize(
    messages: &[ChatMessage],
    completer: &dyn Completer,
    chunk_size: usize,
) -> Result<String, LlmError> {
    let keywords = extract_keywords(messages, completer, chunk_size).await?;
    tracing::info!(keywords = keywords.len(), "keywords extracted");

    let flagged = flag_messages(messages, &keywords);
    tracing::info!(flagged = flagged.len(), "messages flagged");

    synthesize(&flagged, completer).await
}

/// Turn flagged excerpts into the final summary. An empty flag set
/// short-circuits without an API call.
pub async fn synthesize(
    flagged: &[FlaggedMessage],
    completer: &dyn Completer,
) -> Result<String, LlmError> {
    if flagged.is_empty() {
        return Ok(NO_CONTEXT_NOTICE.to_string());
    }

    let request = CompletionRequest {
        prompt: synthesis_prompt(flagged),
        prefill: None,
        stop_sequences: vec![],
        max_tokens: SUMMARY_MAX_TOKENS,
    };
    completer.complete(&request).await
}

fn synthesis_prompt(flagged: &[FlaggedMessage]) -> String {
    let excerpts: Vec<String> = flagged
        .iter()
        .map(|msg| {
            format!(
                "[{}] {}: {}",
                msg.matched_keywords.join(", "),
                msg.role,
                msg.content
            )
        })
        .collect();

    format!(
        "Based on these flagged conversation excerpts, create a structured context summary.\n\
         Organize into these sections (skip any that don't apply):\n\
         \n\
         ## Key Decisions\n\
         ## Important Facts\n\
         ## Technical Details\n\
         ## Open Questions\n\
         \n\
         Be concise. This summary will be used to initialize a new conversation.\n\
         \n\
         Flagged excerpts:\n\
         {}",
        excerpts.join("\n\n")
    )
}
