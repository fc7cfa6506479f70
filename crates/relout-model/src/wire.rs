//! Relation dump parsing.
//!
//! A dump is a JSON object mapping signature paths to column-major arrays:
//!
//! ```json
//! { "/:[]/Int64/Int64": [[1, 2, 3], [10, 20, 30]] }
//! ```
//!
//! Columns exist only for non-constant segments. Values in hash-typed
//! columns (`Hash`, `UInt128`) may arrive as decimal strings because they
//! do not fit a JSON number.

use crate::error::WireError;
use crate::relation::{Relation, RelationSet};
use crate::segment::{Segment, parse_signature};
use crate::value::RelValue;

/// Parse a relation dump from JSON text.
pub fn parse_dump(input: &str) -> Result<RelationSet, WireError> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    relation_set_from_json(&value)
}

/// Parse a relation dump from an already-deserialized JSON value.
pub fn relation_set_from_json(value: &serde_json::Value) -> Result<RelationSet, WireError> {
    let map = value.as_object().ok_or(WireError::NotAnObject)?;
    let mut relations = Vec::with_capacity(map.len());
    for (path, raw_columns) in map {
        relations.push(relation_from_json(path, raw_columns)?);
    }
    Ok(RelationSet::new(relations))
}

fn relation_from_json(path: &str, raw: &serde_json::Value) -> Result<Relation, WireError> {
    let signature = parse_signature(path)?;
    let raw_columns = raw.as_array().ok_or_else(|| WireError::NotColumnar {
        path: path.to_string(),
    })?;
    let data_segments: Vec<&Segment> = signature
        .iter()
        .filter(|segment| !segment.is_constant())
        .collect();
    if raw_columns.len() != data_segments.len() {
        return Err(WireError::ColumnCount {
            path: path.to_string(),
            expected: data_segments.len(),
            found: raw_columns.len(),
        });
    }
    let mut columns = Vec::with_capacity(raw_columns.len());
    for (index, (raw_column, segment)) in raw_columns.iter().zip(&data_segments).enumerate() {
        let cells = raw_column.as_array().ok_or_else(|| WireError::NotColumnar {
            path: path.to_string(),
        })?;
        let column = cells
            .iter()
            .map(|cell| cell_value(cell, segment, path, index))
            .collect::<Result<Vec<_>, _>>()?;
        columns.push(column);
    }
    Relation::new(signature, columns)
}

fn cell_value(
    raw: &serde_json::Value,
    segment: &Segment,
    path: &str,
    column: usize,
) -> Result<RelValue, WireError> {
    let bad_value = || WireError::BadValue {
        path: path.to_string(),
        column,
        value: raw.to_string(),
    };
    match raw {
        serde_json::Value::Null => Ok(RelValue::Null),
        serde_json::Value::Bool(b) => Ok(RelValue::Bool(*b)),
        serde_json::Value::Number(n) => {
            if let Some(v) = n.as_i64() {
                Ok(RelValue::Int(v))
            } else if let Some(v) = n.as_u64() {
                Ok(RelValue::Uint128(u128::from(v)))
            } else if let Some(v) = n.as_f64() {
                Ok(RelValue::Float(v))
            } else {
                Err(bad_value())
            }
        }
        serde_json::Value::String(s) => {
            if segment.is_hash() {
                s.parse::<u128>().map(RelValue::Uint128).map_err(|_| bad_value())
            } else {
                Ok(RelValue::Text(s.clone()))
            }
        }
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => Err(bad_value()),
    }
}
