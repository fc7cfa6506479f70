//! JSON reconstruction from a relation set.
//!
//! Merges every relation's tuples into one hierarchical value by deep
//! assignment with auto-vivification. Containers are created on demand:
//! an array when the next path step is an index, an object otherwise.

use relout_model::{RelationSet, Segment};
use serde_json::Value;
use tracing::debug;

use crate::error::SchemaError;
use crate::path::{PathKey, row_path};

/// Decode a relation set into a single JSON value.
///
/// Fails with [`SchemaError::InconsistentRootArray`] when some but not all
/// relation roots are the array marker, and with
/// [`SchemaError::InvalidJsonSchema`] when a signature cannot be decoded.
/// No partial result is produced on failure.
pub fn decode_json(set: &RelationSet) -> Result<Value, SchemaError> {
    if let Some(scalar) = scalar_shortcut(set) {
        return Ok(scalar);
    }

    let total = set.len();
    let array_roots = set
        .iter()
        .filter(|relation| matches!(relation.signature.first(), Some(Segment::ArrayMarker)))
        .count();
    let mut root = if array_roots == 0 {
        Value::Object(serde_json::Map::new())
    } else if array_roots == total {
        Value::Array(Vec::new())
    } else {
        return Err(SchemaError::InconsistentRootArray);
    };
    debug!(relations = total, array_roots, "decoding relation set");

    for relation in set {
        for row in 0..relation.row_count() {
            let (path, value) = row_path(relation, row)?;
            assign(&mut root, &path, value);
        }
    }
    Ok(root)
}

/// A single arity-1 relation with a non-symbolic column decodes to its bare
/// scalar rather than a container.
fn scalar_shortcut(set: &RelationSet) -> Option<Value> {
    let [relation] = set.relations.as_slice() else {
        return None;
    };
    let [segment] = relation.signature.as_slice() else {
        return None;
    };
    match segment {
        Segment::Symbol(_) | Segment::ArrayMarker => None,
        Segment::Primitive(_) => {
            let first = relation.columns.first().and_then(|column| column.first());
            Some(first.map_or(Value::Null, relout_model::RelValue::to_json))
        }
        Segment::Missing => Some(Value::Null),
    }
}

/// Deep-assign `value` at `path`, creating containers along the way.
///
/// Sparse array writes pad the gap with `null`; a scalar in the way of a
/// descent is replaced by the required container. Writing an empty
/// container over an existing container of the same kind keeps the
/// existing one, so the empty-object and empty-array terminals cannot
/// clobber data merged from a sibling relation.
fn assign(target: &mut Value, path: &[PathKey], value: Value) {
    let Some((head, rest)) = path.split_first() else {
        let keep = match (&value, &*target) {
            (Value::Object(map), Value::Object(_)) => map.is_empty(),
            (Value::Array(items), Value::Array(_)) => items.is_empty(),
            _ => false,
        };
        if !keep {
            *target = value;
        }
        return;
    };
    match head {
        PathKey::Key(key) => {
            if !target.is_object() {
                *target = Value::Object(serde_json::Map::new());
            }
            if let Value::Object(map) = target {
                let slot = map.entry(key.clone()).or_insert(Value::Null);
                assign(slot, rest, value);
            }
        }
        PathKey::Index(index) => {
            if !target.is_array() {
                *target = Value::Array(Vec::new());
            }
            if let Value::Array(items) = target {
                if items.len() <= *index {
                    items.resize(index + 1, Value::Null);
                }
                assign(&mut items[*index], rest, value);
            }
        }
    }
}
