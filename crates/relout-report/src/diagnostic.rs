//! Assembling diagnostics from index-addressed field relations.
//!
//! Each diagnostic arrives as parallel relations under the catalog prefix
//! `/:rel/:catalog/:diagnostic`, one relation per field, every row keyed by
//! a shared 1-based ordinal. Range rows carry a second 1-based ordinal
//! because one diagnostic may own several disjoint ranges.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::warn;

use relout_model::{DIAGNOSTIC_PREFIX, Relation, RelationSet};

use crate::range::{DiagnosticRange, Position, narrow_u32};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Exception,
    Error,
    Warning,
    Suggestion,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Exception => "exception",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Suggestion => "suggestion",
            Severity::Info => "info",
        }
    }

    /// True for severities that should abort a caller's workflow.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Exception | Severity::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exception" => Ok(Severity::Exception),
            "error" => Ok(Severity::Error),
            "warning" => Ok(Severity::Warning),
            "suggestion" => Ok(Severity::Suggestion),
            "info" => Ok(Severity::Info),
            other => Err(format!("unknown severity: {other}")),
        }
    }
}

/// One assembled diagnostic record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub code: String,
    pub message: String,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub ranges: Vec<DiagnosticRange>,
}

impl Diagnostic {
    /// Sort key: the first range's start, with range-less records first.
    pub(crate) fn sort_key(&self) -> (u32, u32) {
        self.ranges
            .first()
            .map_or((0, 0), |range| (range.start.line, range.start.character))
    }
}

#[derive(Debug, Clone, Default)]
struct Slot {
    code: Option<String>,
    message: Option<String>,
    severity: Option<Severity>,
    report: Option<String>,
    model: Option<String>,
    ranges: Vec<RangeSlot>,
    touched: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct RangeSlot {
    start: Position,
    end: Position,
    touched: bool,
}

/// Assemble ordered diagnostics from the relation set.
///
/// Never fails on data-shape issues: unknown fields and malformed rows are
/// skipped with a log, and whatever could be decoded is returned.
pub fn assemble_diagnostics(set: &RelationSet) -> Vec<Diagnostic> {
    let mut slots: Vec<Slot> = Vec::new();
    for relation in set.under_prefix(&DIAGNOSTIC_PREFIX) {
        let Some(field) = relation.leading_symbol().map(str::to_string) else {
            warn!(path = %relation.path(), "diagnostic relation without a field symbol");
            continue;
        };
        match field.as_str() {
            "code" | "message" | "severity" | "report" | "model" => {
                assemble_scalar_field(&mut slots, &relation, &field);
            }
            "range" => assemble_range_field(&mut slots, &relation),
            other => {
                warn!(field = other, "skipping unknown diagnostic field");
            }
        }
    }

    let mut diagnostics: Vec<Diagnostic> = slots
        .into_iter()
        .filter(|slot| slot.touched)
        .map(materialize)
        .collect();
    diagnostics.sort_by_key(Diagnostic::sort_key);
    diagnostics
}

fn assemble_scalar_field(slots: &mut Vec<Slot>, relation: &Relation, field: &str) {
    let [ordinals, values] = relation.columns.as_slice() else {
        warn!(path = %relation.path(), "diagnostic field needs ordinal and value columns");
        return;
    };
    for (ordinal_value, value) in ordinals.iter().zip(values) {
        let Some(ordinal) = positive_ordinal(ordinal_value.as_i64()) else {
            warn!(path = %relation.path(), "skipping row with non-positive ordinal");
            continue;
        };
        let text = value
            .as_text()
            .map_or_else(|| value.display_form(), str::to_string);
        let slot = slot_at(slots, ordinal);
        match field {
            "code" => slot.code = Some(text),
            "message" => slot.message = Some(text),
            "report" => slot.report = Some(text),
            "model" => slot.model = Some(text),
            "severity" => {
                slot.severity = Some(text.parse().unwrap_or_else(|_| {
                    warn!(severity = %text, "unknown severity, defaulting to error");
                    Severity::Error
                }));
            }
            _ => unreachable!("caller matched the field"),
        }
    }
}

fn assemble_range_field(slots: &mut Vec<Slot>, relation: &Relation) {
    let (which, part) = (
        relation.signature.get(1).and_then(|s| s.symbol_name()),
        relation.signature.get(2).and_then(|s| s.symbol_name()),
    );
    let (Some(which), Some(part)) = (which, part) else {
        warn!(path = %relation.path(), "range relation without start/end qualifiers");
        return;
    };
    let [ordinals, range_ordinals, values] = relation.columns.as_slice() else {
        warn!(path = %relation.path(), "range field needs three data columns");
        return;
    };
    for ((ordinal_value, range_ordinal_value), value) in
        ordinals.iter().zip(range_ordinals).zip(values)
    {
        let (Some(ordinal), Some(range_ordinal)) = (
            positive_ordinal(ordinal_value.as_i64()),
            positive_ordinal(range_ordinal_value.as_i64()),
        ) else {
            warn!(path = %relation.path(), "skipping range row with non-positive ordinal");
            continue;
        };
        let Some(coordinate) = value.as_i64() else {
            warn!(path = %relation.path(), "skipping range row with non-integer coordinate");
            continue;
        };
        let coordinate = narrow_u32(coordinate);
        let slot = slot_at(slots, ordinal);
        if slot.ranges.len() < range_ordinal {
            slot.ranges.resize(range_ordinal, RangeSlot::default());
        }
        let range = &mut slot.ranges[range_ordinal - 1];
        range.touched = true;
        match (which, part) {
            ("start", "line") => range.start.line = coordinate,
            ("start", "character") => range.start.character = coordinate,
            ("end", "line") => range.end.line = coordinate,
            ("end", "character") => range.end.character = coordinate,
            _ => warn!(which, part, "skipping unknown range qualifier"),
        }
    }
}

fn slot_at(slots: &mut Vec<Slot>, ordinal: usize) -> &mut Slot {
    if slots.len() < ordinal {
        slots.resize(ordinal, Slot::default());
    }
    let slot = &mut slots[ordinal - 1];
    slot.touched = true;
    slot
}

fn positive_ordinal(value: Option<i64>) -> Option<usize> {
    match value {
        Some(v) if v >= 1 => usize::try_from(v).ok(),
        _ => None,
    }
}

fn materialize(slot: Slot) -> Diagnostic {
    Diagnostic {
        code: slot.code.unwrap_or_default(),
        message: slot.message.unwrap_or_default(),
        severity: slot.severity.unwrap_or(Severity::Error),
        report: slot.report,
        model: slot.model,
        ranges: slot
            .ranges
            .into_iter()
            .filter(|range| range.touched)
            .map(|range| DiagnosticRange::new(range.start, range.end))
            .collect(),
    }
}
