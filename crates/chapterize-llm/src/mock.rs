use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use chapterize_core::{BoundaryCandidate, ChatMessage, LlmError};

use crate::client::{Completer, CompletionRequest};
use crate::detector::BoundaryDetector;

/// Scripted detector for deterministic tests without API calls. Responses
/// are consumed in call order; the offsets each call was made with are
/// recorded so tests can assert on window ordering.
pub struct MockDetector {
    responses: Mutex<VecDeque<Result<Vec<BoundaryCandidate>, LlmError>>>,
    offsets: Mutex<Vec<usize>>,
}

impl MockDetector {
    pub fn new(responses: Vec<Result<Vec<BoundaryCandidate>, LlmError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            offsets: Mutex::new(Vec::new()),
        }
    }

    /// Convenience: script a sequence of successful windows.
    pub fn from_windows(windows: Vec<Vec<BoundaryCandidate>>) -> Self {
        Self::new(windows.into_iter().map(Ok).collect())
    }

    pub fn call_count(&self) -> usize {
        self.offsets.lock().len()
    }

    /// Offsets seen so far, in call order.
    pub fn offsets(&self) -> Vec<usize> {
        self.offsets.lock().clone()
    }
}

#[async_trait]
impl BoundaryDetector for MockDetector {
    async fn detect_boundaries(
        &self,
        _window: &[ChatMessage],
        offset: usize,
    ) -> Result<Vec<BoundaryCandidate>, LlmError> {
        self.offsets.lock().push(offset);
        self.responses.lock().pop_front().unwrap_or_else(|| {
            Err(LlmError::InvalidRequest(format!(
                "MockDetector: no response scripted for call at offset {offset}"
            )))
        })
    }
}

/// Scripted completer counterpart for pipelines built on raw completions.
/// Records every prompt it was given.
pub struct MockCompleter {
    responses: Mutex<VecDeque<Result<String, LlmError>>>,
    prompts: Mutex<Vec<String>>,
}

impl MockCompleter {
    pub fn new(responses: Vec<Result<String, LlmError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn from_texts(texts: Vec<&str>) -> Self {
        Self::new(texts.into_iter().map(|t| Ok(t.to_string())).collect())
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl Completer for MockCompleter {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        self.prompts.lock().push(request.prompt.clone());
        self.responses.lock().pop_front().unwrap_or_else(|| {
            Err(LlmError::InvalidRequest(
                "MockCompleter: response script exhausted".into(),
            ))
        })
    }
}
