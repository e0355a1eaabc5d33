pub mod assemble;
pub mod digest;
pub mod error;
pub mod merge;
pub mod planner;
pub mod segmenter;
pub mod transcript;

pub use error::EngineError;
pub use planner::SegmenterConfig;
pub use segmenter::Segmenter;
pub use transcript::{load_transcript, TranscriptError};
