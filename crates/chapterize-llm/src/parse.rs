use chapterize_core::{BoundaryCandidate, LlmError};

/// Decode the detector's reply into boundary candidates. The reply is
/// expected to contain one JSON array, possibly followed by extraneous
/// prose; everything after the array is ignored. The decoded list is
/// returned as-is — contiguity enforcement is the merger's job.
pub fn parse_boundary_array(raw: &str) -> Result<Vec<BoundaryCandidate>, LlmError> {
    let payload = balanced_array(raw)?;
    serde_json::from_str(payload)
        .map_err(|e| LlmError::MalformedResponse(format!("invalid boundary JSON: {e}")))
}

/// Truncate `raw` at the point where the enclosing array structure first
/// balances back to depth zero. A reply whose brackets never balance has no
/// usable payload.
fn balanced_array(raw: &str) -> Result<&str, LlmError> {
    let mut depth: u32 = 0;
    let mut entered = false;
    for (i, ch) in raw.char_indices() {
        match ch {
            '[' => {
                depth += 1;
                entered = true;
            }
            ']' if entered => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&raw[..i + 1]);
                }
            }
            _ => {}
        }
    }
    Err(LlmError::MalformedResponse(
        "boundary array never balances".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_clean_array() {
        let raw = r#"[{"topic":"intro","start":0,"end":4},{"topic":"debugging","start":5,"end":9}]"#;
        let candidates = parse_boundary_array(raw).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0], BoundaryCandidate::new("intro", 0, 4));
        assert_eq!(candidates[1], BoundaryCandidate::new("debugging", 5, 9));
    }

    #[test]
    fn ignores_trailing_commentary() {
        let raw = "[{\"topic\":\"x\",\"start\":0,\"end\":5}]\nextra commentary the model added";
        let candidates = parse_boundary_array(raw).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0], BoundaryCandidate::new("x", 0, 5));
    }

    #[test]
    fn ignores_trailing_second_array() {
        let raw = r#"[{"topic":"a","start":0,"end":1}] and also [1,2,3]"#;
        let candidates = parse_boundary_array(raw).unwrap();
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn unbalanced_array_is_malformed() {
        let raw = r#"[{"topic":"a","start":0,"end":1},{"topic":"b","start":2"#;
        assert!(matches!(
            parse_boundary_array(raw),
            Err(LlmError::MalformedResponse(_))
        ));
    }

    #[test]
    fn missing_array_is_malformed() {
        let raw = "I could not find any topic boundaries.";
        assert!(matches!(
            parse_boundary_array(raw),
            Err(LlmError::MalformedResponse(_))
        ));
    }

    #[test]
    fn leading_junk_is_not_stripped() {
        // The payload is cut where the array balances, counted from the
        // start of the reply; junk before the first open bracket stays in
        // the slice and fails decoding rather than being guessed around.
        let raw = r#"sure! [{"topic":"a","start":0,"end":1}]"#;
        assert!(matches!(
            parse_boundary_array(raw),
            Err(LlmError::MalformedResponse(_))
        ));
    }

    #[test]
    fn balanced_but_wrong_shape_is_malformed() {
        let raw = r#"[1, 2, 3]"#;
        assert!(matches!(
            parse_boundary_array(raw),
            Err(LlmError::MalformedResponse(_))
        ));
    }

    #[test]
    fn empty_array_parses_to_empty_list() {
        // Structurally valid; the assembler rejects it downstream.
        let candidates = parse_boundary_array("[]").unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn nested_arrays_balance_at_the_outer_close() {
        let raw = r#"[{"topic":"a [draft]","start":0,"end":1}] trailing"#;
        // Brackets inside string values still count toward depth; this is
        // the same tolerance boundary the numbered-listing prompt assumes,
        // so topics with paired brackets survive while the payload is still
        // cut at the first overall balance point.
        let candidates = parse_boundary_array(raw).unwrap();
        assert_eq!(candidates[0].topic, "a [draft]");
    }
}
