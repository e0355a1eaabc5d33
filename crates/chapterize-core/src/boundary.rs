use serde::{Deserialize, Serialize};

/// A detector-proposed topic segment. Indices are global (relative to the
/// whole conversation, not the window it came from) and untrusted: a
/// candidate list may contain gaps, overlaps, or indices outside its own
/// window. The merger is responsible for reconciling them.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoundaryCandidate {
    pub topic: String,
    pub start: usize,
    pub end: usize,
}

impl BoundaryCandidate {
    pub fn new(topic: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            topic: topic.into(),
            start,
            end,
        }
    }
}

/// A planned analysis window: a contiguous slice `[offset, offset + len)`
/// of the conversation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowSpec {
    pub offset: usize,
    pub len: usize,
}

impl WindowSpec {
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_deserializes_from_detector_shape() {
        let json = r#"{"topic": "rust basics", "start": 0, "end": 12}"#;
        let c: BoundaryCandidate = serde_json::from_str(json).unwrap();
        assert_eq!(c, BoundaryCandidate::new("rust basics", 0, 12));
    }

    #[test]
    fn window_end_is_exclusive() {
        let w = WindowSpec { offset: 70, len: 80 };
        assert_eq!(w.end(), 150);
    }
}
