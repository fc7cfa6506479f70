//! Tuple-to-path construction.
//!
//! Every tuple of a relation decodes to a structural path plus a terminal
//! value. Symbolic constants become object keys, the array marker turns the
//! following column into a zero-based index, and any other data column
//! contributes its display form as a key. The last column is the terminal.

use relout_model::{Relation, TypeDef, TypedValue};
use serde_json::Value;

use crate::error::SchemaError;

/// One resolved step of a decoded path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathKey {
    Key(String),
    Index(usize),
}

/// A path step that may still be waiting for its index column.
enum Step {
    Resolved(PathKey),
    /// Pushed by the array marker; replaced by the next data column.
    ArraySlot,
}

/// Decode one tuple into `(path, terminal)`.
///
/// `row` is the tuple's ordinal within the relation. It doubles as the
/// index fallback when an index column is not a positive integer; that
/// fallback is lossy when several relations interleave at the same path,
/// and is kept for compatibility with the wire producers.
pub fn row_path(relation: &Relation, row: usize) -> Result<(Vec<PathKey>, Value), SchemaError> {
    let tuple = relation.expanded_row(row);
    let invalid = || SchemaError::InvalidJsonSchema {
        signature: relation.path(),
    };
    let (terminal, head) = tuple.split_last().ok_or_else(invalid)?;

    let mut steps: Vec<Step> = Vec::with_capacity(head.len());
    for typed in head {
        push_step(&mut steps, typed, row);
    }

    let value = match &terminal.type_def {
        TypeDef::Missing => {
            if matches!(steps.last(), Some(Step::ArraySlot)) {
                steps.pop();
                Value::Array(Vec::new())
            } else {
                Value::Null
            }
        }
        TypeDef::Constant { .. } if terminal.type_def.is_array_marker() => Value::Array(Vec::new()),
        TypeDef::Constant { symbol } => {
            steps.push(Step::Resolved(PathKey::Key(symbol.clone())));
            Value::Object(serde_json::Map::new())
        }
        TypeDef::Primitive { .. } | TypeDef::SyntheticBool => terminal.value.to_json(),
    };

    let mut path = Vec::with_capacity(steps.len());
    for step in steps {
        match step {
            Step::Resolved(key) => path.push(key),
            // An array marker whose index column never arrived.
            Step::ArraySlot => return Err(invalid()),
        }
    }
    Ok((path, value))
}

fn push_step(steps: &mut Vec<Step>, typed: &TypedValue, row: usize) {
    match &typed.type_def {
        TypeDef::Constant { .. } if typed.type_def.is_array_marker() => {
            steps.push(Step::ArraySlot);
        }
        TypeDef::Constant { symbol } => {
            steps.push(Step::Resolved(PathKey::Key(symbol.clone())));
        }
        TypeDef::Primitive { .. } | TypeDef::Missing | TypeDef::SyntheticBool => {
            if matches!(steps.last(), Some(Step::ArraySlot)) {
                steps.pop();
                let index = typed.value.as_index().unwrap_or(row);
                steps.push(Step::Resolved(PathKey::Index(index)));
            } else {
                steps.push(Step::Resolved(PathKey::Key(typed.value.display_form())));
            }
        }
    }
}
