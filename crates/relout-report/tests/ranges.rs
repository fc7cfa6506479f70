//! Property tests for the range remapping helper.

use proptest::prelude::*;
use relout_report::{Diagnostic, DiagnosticRange, Position, Severity, offset_ranges};

fn diagnostic(ranges: Vec<(u32, u32, u32, u32)>) -> Diagnostic {
    Diagnostic {
        code: "X1".to_string(),
        message: "m".to_string(),
        severity: Severity::Warning,
        report: None,
        model: None,
        ranges: ranges
            .into_iter()
            .map(|(sl, sc, el, ec)| {
                DiagnosticRange::new(Position::new(sl, sc), Position::new(el, ec))
            })
            .collect(),
    }
}

proptest! {
    #[test]
    fn never_mutates_its_input(
        ranges in proptest::collection::vec(
            (0u32..1000, 0u32..200, 0u32..1000, 0u32..200),
            0..4,
        ),
        line_delta in -2000i64..2000,
        character_delta in -500i64..500,
    ) {
        let input = vec![diagnostic(ranges)];
        let snapshot = input.clone();
        let _ = offset_ranges(&input, line_delta, character_delta);
        prop_assert_eq!(&input, &snapshot);
    }

    #[test]
    fn zero_offset_is_identity(
        ranges in proptest::collection::vec(
            (0u32..1000, 0u32..200, 0u32..1000, 0u32..200),
            0..4,
        ),
    ) {
        let input = vec![diagnostic(ranges)];
        let remapped = offset_ranges(&input, 0, 0);
        prop_assert_eq!(remapped, input);
    }

    #[test]
    fn positive_offset_shifts_every_range(
        start_line in 0u32..1000,
        delta in 1i64..100,
    ) {
        let input = vec![diagnostic(vec![(start_line, 0, start_line, 10)])];
        let remapped = offset_ranges(&input, delta, 0);
        let expected = start_line + u32::try_from(delta).unwrap();
        prop_assert_eq!(remapped[0].ranges[0].start.line, expected);
        prop_assert_eq!(remapped[0].ranges[0].end.line, expected);
    }
}
