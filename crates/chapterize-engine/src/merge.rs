use chapterize_core::BoundaryCandidate;

/// Fold per-window candidate lists, in window order, into one global
/// partition covering `[0, total_messages)`.
///
/// The fold is greedy and single-pass: once a window's contribution is
/// accepted it is frozen, and a later window's candidates only count for
/// territory past everything already merged, under the later window's topic
/// label. Decisions are never revisited, so the result depends on window
/// order.
///
/// Two deterministic repairs close out the fold: any residual gap is
/// closed by pulling the later element's start back to meet its
/// predecessor, and the final element's end is forced to the last message
/// regardless of detector drift.
pub fn merge_windows(
    per_window: Vec<Vec<BoundaryCandidate>>,
    total_messages: usize,
) -> Vec<BoundaryCandidate> {
    let mut windows = per_window.into_iter();
    let Some(first) = windows.next() else {
        return Vec::new();
    };
    let mut merged = first;

    for window in windows {
        let Some(last) = merged.last() else {
            // Nothing accepted yet; this window starts the partition.
            merged = window;
            continue;
        };
        let mut prev_end = last.end;

        for candidate in window {
            if candidate.start > prev_end {
                prev_end = candidate.end;
                merged.push(candidate);
            } else if candidate.end > prev_end {
                // Starts inside settled territory but extends past it:
                // keep only the new tail, under the new window's label.
                let trimmed =
                    BoundaryCandidate::new(candidate.topic, prev_end + 1, candidate.end);
                prev_end = trimmed.end;
                merged.push(trimmed);
            }
            // Entirely within settled territory: adds no coverage, drop it.
        }
    }

    // Gap repair: force each start to meet its predecessor. The later
    // element always yields; messages are never handed back to the
    // earlier one.
    for i in 1..merged.len() {
        let expected = merged[i - 1].end + 1;
        if merged[i].start != expected {
            merged[i].start = expected;
        }
    }

    // Right-coverage is guaranteed unconditionally.
    if let Some(last) = merged.last_mut() {
        last.end = total_messages.saturating_sub(1);
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(topic: &str, start: usize, end: usize) -> BoundaryCandidate {
        BoundaryCandidate::new(topic, start, end)
    }

    #[test]
    fn single_window_passes_through_with_end_forced() {
        let merged = merge_windows(vec![vec![c("a", 0, 50), c("b", 51, 99)]], 100);
        assert_eq!(merged, vec![c("a", 0, 50), c("b", 51, 99)]);
    }

    #[test]
    fn single_window_final_end_is_forced() {
        // Detector stopped short of the last message.
        let merged = merge_windows(vec![vec![c("a", 0, 50), c("b", 51, 90)]], 100);
        assert_eq!(merged, vec![c("a", 0, 50), c("b", 51, 99)]);
    }

    #[test]
    fn reference_two_window_merge() {
        // window 1 covers [0,80), window 2 covers [70,150). Window 2's
        // first candidate starts in settled territory; only its tail past
        // 79 survives, under its own label, and later candidates follow
        // from there.
        let w1 = vec![c("A", 0, 50), c("B", 51, 79)];
        let w2 = vec![c("B", 70, 100), c("C", 101, 149)];
        let merged = merge_windows(vec![w1, w2], 150);
        assert_eq!(
            merged,
            vec![c("A", 0, 50), c("B", 51, 79), c("B", 80, 100), c("C", 101, 149)]
        );
    }

    #[test]
    fn candidate_entirely_inside_settled_territory_is_discarded() {
        let w1 = vec![c("a", 0, 79)];
        let w2 = vec![c("echo", 70, 75), c("new", 80, 149)];
        let merged = merge_windows(vec![w1, w2], 150);
        assert_eq!(merged, vec![c("a", 0, 79), c("new", 80, 149)]);
    }

    #[test]
    fn partial_overlap_is_trimmed_and_keeps_later_label() {
        let w1 = vec![c("setup", 0, 79)];
        let w2 = vec![c("deploy", 60, 120)];
        let merged = merge_windows(vec![w1, w2], 121);
        assert_eq!(merged, vec![c("setup", 0, 79), c("deploy", 80, 120)]);
    }

    #[test]
    fn gap_repair_pulls_later_start_back() {
        let merged = merge_windows(vec![vec![c("A", 0, 40), c("B", 45, 99)]], 100);
        assert_eq!(merged, vec![c("A", 0, 40), c("B", 41, 99)]);
    }

    #[test]
    fn gap_between_windows_is_repaired() {
        let w1 = vec![c("a", 0, 79)];
        let w2 = vec![c("b", 85, 149)];
        let merged = merge_windows(vec![w1, w2], 150);
        assert_eq!(merged, vec![c("a", 0, 79), c("b", 80, 149)]);
    }

    #[test]
    fn overlapping_candidates_within_one_later_window_are_reconciled() {
        // The second window's own list overlaps itself; accepted ground
        // advances with every accepted candidate, so the overlap is
        // trimmed rather than duplicated.
        let w1 = vec![c("a", 0, 79)];
        let w2 = vec![c("b", 80, 120), c("c", 110, 149)];
        let merged = merge_windows(vec![w1, w2], 150);
        assert_eq!(merged, vec![c("a", 0, 79), c("b", 80, 120), c("c", 121, 149)]);
    }

    #[test]
    fn empty_first_window_defers_to_later_windows() {
        let merged = merge_windows(vec![vec![], vec![c("b", 0, 149)]], 150);
        assert_eq!(merged, vec![c("b", 0, 149)]);
    }

    #[test]
    fn no_windows_yields_empty_partition() {
        assert!(merge_windows(vec![], 100).is_empty());
    }

    #[test]
    fn three_window_fold_preserves_window_order_precedence() {
        let w1 = vec![c("a", 0, 50)];
        let w2 = vec![c("b", 40, 100)];
        let w3 = vec![c("c", 90, 140)];
        let merged = merge_windows(vec![w1, w2, w3], 150);
        assert_eq!(
            merged,
            vec![c("a", 0, 50), c("b", 51, 100), c("c", 101, 149)]
        );
    }

    #[test]
    fn later_window_stopping_short_still_forces_right_coverage() {
        let w1 = vec![c("a", 0, 79)];
        let w2 = vec![c("b", 80, 130)];
        let merged = merge_windows(vec![w1, w2], 150);
        assert_eq!(merged.last().unwrap().end, 149);
    }
}
