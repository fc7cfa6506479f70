//! Assembling integrity-constraint violations from hash-addressed
//! field relations.
//!
//! Violations arrive under `/:rel/:catalog/:ic_violation`, keyed by a
//! 128-bit content hash rather than an ordinal. Scalar and range fields
//! carry one row per hash; output rows arrive pre-sorted by hash within
//! each relation, so grouping them is a single linear pass over the hash
//! column.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use tracing::warn;

use relout_model::{IC_VIOLATION_PREFIX, Relation, RelationSet};

use crate::range::{DiagnosticRange, Position, narrow_u32};

/// One integrity-constraint violation with its captured output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IcViolation {
    /// Content-hash identity, rendered as hex.
    #[serde(serialize_with = "hash_hex")]
    pub hash: u128,
    pub decl_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub report: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<DiagnosticRange>,
    /// Captured output runs, one sub-relation per contiguous hash run.
    pub output: Vec<Relation>,
}

fn hash_hex<S: Serializer>(hash: &u128, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(hash.to_be_bytes()))
}

#[derive(Debug, Clone, Default)]
struct Slot {
    decl_id: Option<String>,
    name: Option<String>,
    report: Option<String>,
    model: Option<String>,
    start_line: Option<u32>,
    start_character: Option<u32>,
    end_line: Option<u32>,
    end_character: Option<u32>,
    output: Vec<Relation>,
}

impl Slot {
    fn range(&self) -> Option<DiagnosticRange> {
        if self.start_line.is_none()
            && self.start_character.is_none()
            && self.end_line.is_none()
            && self.end_character.is_none()
        {
            return None;
        }
        Some(DiagnosticRange::new(
            Position::new(
                self.start_line.unwrap_or_default(),
                self.start_character.unwrap_or_default(),
            ),
            Position::new(
                self.end_line.unwrap_or_default(),
                self.end_character.unwrap_or_default(),
            ),
        ))
    }
}

/// Assemble the ordered violation list from the relation set.
///
/// Like the diagnostic assembler this never fails on data-shape issues;
/// malformed relations are skipped with a log.
pub fn assemble_ic_violations(set: &RelationSet) -> Vec<IcViolation> {
    let mut slots: BTreeMap<u128, Slot> = BTreeMap::new();
    for relation in set.under_prefix(&IC_VIOLATION_PREFIX) {
        let Some(field) = relation.leading_symbol().map(str::to_string) else {
            warn!(path = %relation.path(), "violation relation without a field symbol");
            continue;
        };
        match field.as_str() {
            "decl_id" | "name" | "report" | "model" => {
                assemble_scalar_field(&mut slots, &relation, &field);
            }
            "range" => assemble_range_field(&mut slots, &relation),
            "output" => assemble_output_field(&mut slots, &relation),
            other => {
                warn!(field = other, "skipping unknown violation field");
            }
        }
    }

    let mut violations: Vec<IcViolation> = slots
        .into_iter()
        .map(|(hash, slot)| IcViolation {
            hash,
            range: slot.range(),
            decl_id: slot.decl_id.unwrap_or_default(),
            name: slot.name,
            report: slot.report.unwrap_or_default(),
            model: slot.model,
            output: slot.output,
        })
        .collect();
    violations.sort_by_key(|violation| {
        violation
            .range
            .map_or((0, 0), |range| (range.start.line, range.start.character))
    });
    violations
}

fn assemble_scalar_field(slots: &mut BTreeMap<u128, Slot>, relation: &Relation, field: &str) {
    let [hashes, values] = relation.columns.as_slice() else {
        warn!(path = %relation.path(), "violation field needs hash and value columns");
        return;
    };
    for (hash_value, value) in hashes.iter().zip(values) {
        let Some(hash) = hash_value.as_u128() else {
            warn!(path = %relation.path(), "skipping row with non-hash key");
            continue;
        };
        let text = value
            .as_text()
            .map_or_else(|| value.display_form(), str::to_string);
        let slot = slots.entry(hash).or_default();
        match field {
            "decl_id" => slot.decl_id = Some(text),
            "name" => slot.name = Some(text),
            "report" => slot.report = Some(text),
            "model" => slot.model = Some(text),
            _ => unreachable!("caller matched the field"),
        }
    }
}

fn assemble_range_field(slots: &mut BTreeMap<u128, Slot>, relation: &Relation) {
    let (which, part) = (
        relation.signature.get(1).and_then(|s| s.symbol_name()),
        relation.signature.get(2).and_then(|s| s.symbol_name()),
    );
    let (Some(which), Some(part)) = (which, part) else {
        warn!(path = %relation.path(), "violation range without start/end qualifiers");
        return;
    };
    let [hashes, values] = relation.columns.as_slice() else {
        warn!(path = %relation.path(), "violation range needs hash and value columns");
        return;
    };
    for (hash_value, value) in hashes.iter().zip(values) {
        let Some(hash) = hash_value.as_u128() else {
            warn!(path = %relation.path(), "skipping row with non-hash key");
            continue;
        };
        let Some(coordinate) = value.as_i64() else {
            warn!(path = %relation.path(), "skipping range row with non-integer coordinate");
            continue;
        };
        let coordinate = narrow_u32(coordinate);
        let slot = slots.entry(hash).or_default();
        match (which, part) {
            ("start", "line") => slot.start_line = Some(coordinate),
            ("start", "character") => slot.start_character = Some(coordinate),
            ("end", "line") => slot.end_line = Some(coordinate),
            ("end", "character") => slot.end_character = Some(coordinate),
            _ => warn!(which, part, "skipping unknown range qualifier"),
        }
    }
}

/// Group one output relation's rows into per-hash runs.
///
/// Rows are pre-sorted by hash, so a run ends exactly where the hash
/// column changes. Each run is sliced into a sub-relation whose signature
/// is the schema suffix after the hash column.
fn assemble_output_field(slots: &mut BTreeMap<u128, Slot>, relation: &Relation) {
    if relation.signature.len() < 2 || !relation.signature[1].is_hash() {
        warn!(path = %relation.path(), "violation output without a hash column");
        return;
    }
    let suffix = relation.signature[2..].to_vec();
    let Some((hash_column, payload)) = relation.columns.split_first() else {
        warn!(path = %relation.path(), "violation output without data columns");
        return;
    };
    let mut hashes = Vec::with_capacity(hash_column.len());
    for value in hash_column {
        match value.as_u128() {
            Some(hash) => hashes.push(hash),
            None => {
                warn!(path = %relation.path(), "violation output with a non-hash key");
                return;
            }
        }
    }

    let mut run_start = 0usize;
    for i in 1..=hashes.len() {
        if i < hashes.len() && hashes[i] == hashes[run_start] {
            continue;
        }
        let columns = payload
            .iter()
            .map(|column| column[run_start..i].to_vec())
            .collect();
        match Relation::new(suffix.clone(), columns) {
            Ok(run) => slots.entry(hashes[run_start]).or_default().output.push(run),
            Err(error) => {
                warn!(path = %relation.path(), %error, "violation output schema mismatch");
                return;
            }
        }
        run_start = i;
    }
}
