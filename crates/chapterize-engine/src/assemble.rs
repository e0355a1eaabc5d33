use chapterize_core::{BoundaryCandidate, ChatMessage, Segment, SegmentMessage};

use crate::error::EngineError;

/// Materialize the merged partition into final segments, after checking
/// the structural invariants: ascending coverage starting at 0, ending at
/// the last message, adjacent segments meeting exactly, every message in
/// exactly one segment. A violation here is a hard stop — it means a merge
/// defect or data the engine cannot safely segment, not something to paper
/// over.
pub fn assemble_segments(
    messages: &[ChatMessage],
    partition: &[BoundaryCandidate],
) -> Result<Vec<Segment>, EngineError> {
    validate_partition(partition, messages.len())?;

    let segments = partition
        .iter()
        .enumerate()
        .map(|(i, boundary)| {
            let segment_messages: Vec<SegmentMessage> = (boundary.start..=boundary.end)
                .map(|index| SegmentMessage {
                    index,
                    role: messages[index].role,
                    content: messages[index].content.clone(),
                })
                .collect();
            Segment {
                segment_id: (i + 1) as u32,
                topic: boundary.topic.clone(),
                start_index: boundary.start,
                end_index: boundary.end,
                message_count: boundary.end - boundary.start + 1,
                messages: segment_messages,
            }
        })
        .collect();

    Ok(segments)
}

fn validate_partition(
    partition: &[BoundaryCandidate],
    total_messages: usize,
) -> Result<(), EngineError> {
    if partition.is_empty() {
        return Err(EngineError::EmptyPartition);
    }

    for (i, boundary) in partition.iter().enumerate() {
        if boundary.end < boundary.start {
            return Err(EngineError::InvariantViolation {
                segment: i + 1,
                detail: "segment range inverted, end is before start".into(),
                expected: boundary.start,
                actual: boundary.end,
            });
        }
        if boundary.end >= total_messages {
            return Err(EngineError::InvariantViolation {
                segment: i + 1,
                detail: "segment end beyond last message".into(),
                expected: total_messages - 1,
                actual: boundary.end,
            });
        }
    }

    let first = &partition[0];
    if first.start != 0 {
        return Err(EngineError::InvariantViolation {
            segment: 1,
            detail: "first segment start".into(),
            expected: 0,
            actual: first.start,
        });
    }

    let last = &partition[partition.len() - 1];
    if last.end != total_messages - 1 {
        return Err(EngineError::InvariantViolation {
            segment: partition.len(),
            detail: "last segment end".into(),
            expected: total_messages - 1,
            actual: last.end,
        });
    }

    for i in 1..partition.len() {
        let expected = partition[i - 1].end + 1;
        if partition[i].start != expected {
            return Err(EngineError::InvariantViolation {
                segment: i + 1,
                detail: "gap or overlap before segment".into(),
                expected,
                actual: partition[i].start,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chapterize_core::Role;

    fn messages(n: usize) -> Vec<ChatMessage> {
        (0..n)
            .map(|i| {
                if i % 2 == 0 {
                    ChatMessage::user(format!("question {i}"))
                } else {
                    ChatMessage::assistant(format!("answer {i}"))
                }
            })
            .collect()
    }

    fn c(topic: &str, start: usize, end: usize) -> BoundaryCandidate {
        BoundaryCandidate::new(topic, start, end)
    }

    #[test]
    fn assembles_sequential_segments() {
        let msgs = messages(10);
        let segments =
            assemble_segments(&msgs, &[c("intro", 0, 3), c("details", 4, 9)]).unwrap();

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].segment_id, 1);
        assert_eq!(segments[1].segment_id, 2);
        assert_eq!(segments[0].message_count, 4);
        assert_eq!(segments[1].message_count, 6);
        assert_eq!(segments[0].messages[0].index, 0);
        assert_eq!(segments[0].messages[0].role, Role::User);
        assert_eq!(segments[0].messages[0].content, "question 0");
        assert_eq!(segments[1].messages[0].index, 4);
        assert_eq!(segments[1].messages.last().unwrap().index, 9);
    }

    #[test]
    fn every_message_lands_in_exactly_one_segment() {
        let msgs = messages(25);
        let segments =
            assemble_segments(&msgs, &[c("a", 0, 7), c("b", 8, 19), c("c", 20, 24)]).unwrap();

        let mut seen = vec![0usize; 25];
        for seg in &segments {
            for msg in &seg.messages {
                seen[msg.index] += 1;
            }
        }
        assert!(seen.iter().all(|&count| count == 1));
    }

    #[test]
    fn assembly_is_idempotent() {
        let msgs = messages(10);
        let partition = [c("intro", 0, 3), c("details", 4, 9)];
        let first = assemble_segments(&msgs, &partition).unwrap();
        let second = assemble_segments(&msgs, &partition).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_partition_is_rejected() {
        let msgs = messages(5);
        assert!(matches!(
            assemble_segments(&msgs, &[]),
            Err(EngineError::EmptyPartition)
        ));
    }

    #[test]
    fn first_segment_must_start_at_zero() {
        let msgs = messages(10);
        let err = assemble_segments(&msgs, &[c("a", 1, 9)]).unwrap_err();
        match err {
            EngineError::InvariantViolation {
                segment,
                expected,
                actual,
                ..
            } => {
                assert_eq!(segment, 1);
                assert_eq!(expected, 0);
                assert_eq!(actual, 1);
            }
            other => panic!("expected invariant violation, got: {other}"),
        }
    }

    #[test]
    fn last_segment_must_end_at_final_message() {
        let msgs = messages(10);
        let err = assemble_segments(&msgs, &[c("a", 0, 7)]).unwrap_err();
        match err {
            EngineError::InvariantViolation {
                segment,
                expected,
                actual,
                ..
            } => {
                assert_eq!(segment, 1);
                assert_eq!(expected, 9);
                assert_eq!(actual, 7);
            }
            other => panic!("expected invariant violation, got: {other}"),
        }
    }

    #[test]
    fn gap_between_segments_is_rejected() {
        let msgs = messages(10);
        let err = assemble_segments(&msgs, &[c("a", 0, 3), c("b", 5, 9)]).unwrap_err();
        match err {
            EngineError::InvariantViolation {
                segment,
                expected,
                actual,
                ..
            } => {
                assert_eq!(segment, 2);
                assert_eq!(expected, 4);
                assert_eq!(actual, 5);
            }
            other => panic!("expected invariant violation, got: {other}"),
        }
    }

    #[test]
    fn overlap_between_segments_is_rejected() {
        let msgs = messages(10);
        let err = assemble_segments(&msgs, &[c("a", 0, 5), c("b", 4, 9)]).unwrap_err();
        assert!(matches!(err, EngineError::InvariantViolation { segment: 2, .. }));
    }

    #[test]
    fn out_of_range_end_is_an_error_not_a_panic() {
        let msgs = messages(10);
        let err = assemble_segments(&msgs, &[c("a", 0, 4), c("b", 5, 500)]).unwrap_err();
        match err {
            EngineError::InvariantViolation {
                segment,
                expected,
                actual,
                ..
            } => {
                assert_eq!(segment, 2);
                assert_eq!(expected, 9);
                assert_eq!(actual, 500);
            }
            other => panic!("expected invariant violation, got: {other}"),
        }
    }

    #[test]
    fn inverted_range_is_an_error_not_a_panic() {
        let msgs = messages(10);
        let err = assemble_segments(&msgs, &[c("a", 5, 2)]).unwrap_err();
        assert!(matches!(err, EngineError::InvariantViolation { segment: 1, .. }));
    }
}
