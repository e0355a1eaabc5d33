use async_trait::async_trait;
use tracing::instrument;

use chapterize_core::{BoundaryCandidate, ChatMessage, LlmError};

use crate::client::{AnthropicClient, Completer, CompletionRequest};
use crate::parse;
use crate::prompt;

const BOUNDARY_MAX_TOKENS: u32 = 2000;

/// Proposes topic boundaries for one window of messages. Implementations
/// are black boxes: the returned candidates may violate every contiguity
/// rule the prompt asks for, and callers must cope.
#[async_trait]
pub trait BoundaryDetector: Send + Sync {
    async fn detect_boundaries(
        &self,
        window: &[ChatMessage],
        offset: usize,
    ) -> Result<Vec<BoundaryCandidate>, LlmError>;
}

/// Boundary detection via the Anthropic messages API. The assistant turn is
/// prefilled with `[` and generation stops at a fence, so the reply is the
/// body of a JSON array (which we re-prepend the bracket to).
pub struct AnthropicDetector {
    client: AnthropicClient,
}

impl AnthropicDetector {
    pub fn new(client: AnthropicClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BoundaryDetector for AnthropicDetector {
    #[instrument(skip(self, window), fields(window_len = window.len()))]
    async fn detect_boundaries(
        &self,
        window: &[ChatMessage],
        offset: usize,
    ) -> Result<Vec<BoundaryCandidate>, LlmError> {
        let request = CompletionRequest {
            prompt: prompt::boundary_prompt(window, offset),
            prefill: Some("[".into()),
            stop_sequences: vec!["```".into()],
            max_tokens: BOUNDARY_MAX_TOKENS,
        };

        let text = self.client.complete(&request).await?;
        let raw = format!("[{text}");
        let candidates = parse::parse_boundary_array(&raw)?;

        tracing::debug!(
            offset,
            candidates = candidates.len(),
            "window boundaries detected"
        );
        Ok(candidates)
    }
}
