use std::sync::Arc;

use tracing::instrument;

use chapterize_core::{ChatMessage, Segment};
use chapterize_llm::BoundaryDetector;

use crate::assemble::assemble_segments;
use crate::error::EngineError;
use crate::merge::merge_windows;
use crate::planner::{plan_windows, SegmenterConfig};

/// Orchestrates one segmentation run: plan windows, query the detector per
/// window in window order, fold the answers into a global partition, and
/// materialize validated segments. The only entry point pipeline and CLI
/// callers use.
///
/// Queries run sequentially. They only depend on their inputs, so they
/// could be issued concurrently and folded in window order afterwards, but
/// the sequential form is simpler and merge semantics are identical.
pub struct Segmenter {
    detector: Arc<dyn BoundaryDetector>,
    config: SegmenterConfig,
}

impl Segmenter {
    /// Rejects invalid sizing up front; no work is attempted with a bad
    /// config.
    pub fn new(
        detector: Arc<dyn BoundaryDetector>,
        config: SegmenterConfig,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { detector, config })
    }

    #[instrument(skip(self, messages), fields(total = messages.len()))]
    pub async fn segment(&self, messages: &[ChatMessage]) -> Result<Vec<Segment>, EngineError> {
        if messages.is_empty() {
            return Err(EngineError::EmptyTranscript);
        }

        let windows = plan_windows(messages.len(), &self.config);
        tracing::info!(windows = windows.len(), "planned analysis windows");

        // Window order matters downstream: the fold trusts earlier windows
        // for settled territory.
        let mut per_window = Vec::with_capacity(windows.len());
        for window in &windows {
            let slice = &messages[window.offset..window.end()];
            let candidates = self
                .detector
                .detect_boundaries(slice, window.offset)
                .await?;
            tracing::debug!(
                offset = window.offset,
                candidates = candidates.len(),
                "window answered"
            );
            per_window.push(candidates);
        }

        let partition = merge_windows(per_window, messages.len());
        let segments = assemble_segments(messages, &partition)?;

        tracing::info!(segments = segments.len(), "segmentation complete");
        Ok(segments)
    }
}
