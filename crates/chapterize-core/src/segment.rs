use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::RunId;
use crate::messages::SegmentMessage;

/// The final, user-facing unit of output: a contiguous run of messages
/// under one topic label. Immutable once assembled.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Segment {
    /// 1-based, sequential in message order.
    pub segment_id: u32,
    pub topic: String,
    pub start_index: usize,
    pub end_index: usize,
    pub message_count: usize,
    pub messages: Vec<SegmentMessage>,
}

/// One segmentation run's output plus its metadata envelope.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SegmentationRun {
    pub run_id: RunId,
    /// Where the transcript came from (path or caller-supplied label).
    pub source: String,
    pub total_messages: usize,
    pub segment_count: usize,
    pub generated_at: DateTime<Utc>,
    pub segments: Vec<Segment>,
}

impl SegmentationRun {
    pub fn new(source: impl Into<String>, total_messages: usize, segments: Vec<Segment>) -> Self {
        Self {
            run_id: RunId::new(),
            source: source.into(),
            total_messages,
            segment_count: segments.len(),
            generated_at: Utc::now(),
            segments,
        }
    }
}
