//! Source positions and ranges attached to diagnostics and violations.

use serde::Serialize;

use crate::diagnostic::Diagnostic;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }

    /// Shift by signed deltas, clamping at the `u32` bounds.
    pub fn offset_by(self, line_delta: i64, character_delta: i64) -> Position {
        Position {
            line: shift(self.line, line_delta),
            character: shift(self.character, character_delta),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiagnosticRange {
    pub start: Position,
    pub end: Position,
}

impl DiagnosticRange {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// Narrow a 64-bit wire integer to a position coordinate, clamping.
pub(crate) fn narrow_u32(value: i64) -> u32 {
    u32::try_from(value.clamp(0, i64::from(u32::MAX))).unwrap_or(u32::MAX)
}

fn shift(value: u32, delta: i64) -> u32 {
    narrow_u32(i64::from(value).saturating_add(delta))
}

/// Remap every range of every diagnostic by the given deltas.
///
/// Returns fresh records; the input is never mutated. Used when decoded
/// diagnostics are embedded into a larger document at an offset.
pub fn offset_ranges(
    diagnostics: &[Diagnostic],
    line_delta: i64,
    character_delta: i64,
) -> Vec<Diagnostic> {
    diagnostics
        .iter()
        .map(|diagnostic| {
            let mut remapped = diagnostic.clone();
            remapped.ranges = diagnostic
                .ranges
                .iter()
                .map(|range| {
                    DiagnosticRange::new(
                        range.start.offset_by(line_delta, character_delta),
                        range.end.offset_by(line_delta, character_delta),
                    )
                })
                .collect();
            remapped
        })
        .collect()
}
