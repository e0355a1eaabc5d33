use chapterize_core::LlmError;

use crate::transcript::TranscriptError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Invalid window/overlap sizing. Rejected before any work is done.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("transcript error: {0}")]
    Transcript(#[from] TranscriptError),

    #[error("transcript contains no messages")]
    EmptyTranscript,

    /// A boundary-detection call failed; the run is abandoned without
    /// partial output.
    #[error("boundary detection failed: {0}")]
    Detector(#[from] LlmError),

    #[error("no segments produced")]
    EmptyPartition,

    /// The merged partition broke a structural invariant. Indicates a merge
    /// defect or conversation data the engine cannot safely segment.
    #[error(
        "segmentation invariant violated at segment {segment}: {detail}: expected {expected}, got {actual}"
    )]
    InvariantViolation {
        /// 1-based id of the offending segment.
        segment: usize,
        detail: String,
        expected: usize,
        actual: usize,
    },
}
