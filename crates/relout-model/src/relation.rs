//! Relations and relation sets.

use serde::Serialize;

use crate::error::WireError;
use crate::segment::{Segment, format_signature};
use crate::typedef::TypeDef;
use crate::value::{RelValue, TypedValue};

/// Catalog prefix for diagnostic field relations.
pub const DIAGNOSTIC_PREFIX: [&str; 3] = ["rel", "catalog", "diagnostic"];
/// Catalog prefix for integrity-constraint-violation field relations.
pub const IC_VIOLATION_PREFIX: [&str; 3] = ["rel", "catalog", "ic_violation"];
/// Prefix for relations that feed the pivot table builder.
pub const TABLE_DATA_PREFIX: [&str; 3] = ["rel", "table", "data"];

/// One path-encoded relation.
///
/// `signature` is the parsed identifier; `types` is the parallel column
/// metadata (one entry per segment); `columns` holds the wire data, one
/// column per non-constant segment. Conceptual arity is the segment count,
/// so a row expands constants back into the tuple.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Relation {
    pub signature: Vec<Segment>,
    pub types: Vec<TypeDef>,
    pub columns: Vec<Vec<RelValue>>,
}

impl Relation {
    pub fn new(signature: Vec<Segment>, columns: Vec<Vec<RelValue>>) -> Result<Self, WireError> {
        let path = format_signature(&signature);
        let expected = signature.iter().filter(|s| !s.is_constant()).count();
        if columns.len() != expected {
            return Err(WireError::ColumnCount {
                path,
                expected,
                found: columns.len(),
            });
        }
        if let Some(first) = columns.first()
            && columns.iter().any(|c| c.len() != first.len())
        {
            return Err(WireError::RaggedColumns { path });
        }
        let types = signature.iter().map(TypeDef::classify).collect();
        Ok(Self {
            signature,
            types,
            columns,
        })
    }

    /// Conceptual arity: the segment count, constants included.
    pub fn arity(&self) -> usize {
        self.signature.len()
    }

    /// Number of tuples. A relation made only of constants holds exactly
    /// one fact.
    pub fn row_count(&self) -> usize {
        match self.columns.first() {
            Some(column) => column.len(),
            None => usize::from(!self.signature.is_empty()),
        }
    }

    pub fn path(&self) -> String {
        format_signature(&self.signature)
    }

    pub fn leading_symbol(&self) -> Option<&str> {
        self.signature.first().and_then(Segment::symbol_name)
    }

    /// Expand one tuple to full arity, materializing constant columns.
    pub fn expanded_row(&self, row: usize) -> Vec<TypedValue> {
        let mut data = self.columns.iter().map(|column| &column[row]);
        self.signature
            .iter()
            .zip(&self.types)
            .map(|(segment, type_def)| {
                let value = if segment.is_constant() {
                    match segment {
                        Segment::Symbol(name) => RelValue::Text(name.clone()),
                        Segment::ArrayMarker => RelValue::Text("[]".to_string()),
                        Segment::Primitive(_) | Segment::Missing => unreachable!(),
                    }
                } else {
                    data.next().cloned().unwrap_or(RelValue::Null)
                };
                TypedValue::new(type_def.clone(), value)
            })
            .collect()
    }

    /// Drop the leading segment and its parallel metadata entry.
    pub fn strip_leading(&self) -> Relation {
        Relation {
            signature: self.signature[1..].to_vec(),
            types: self.types[1..].to_vec(),
            columns: self.columns.clone(),
        }
    }

    /// Strip a symbolic prefix, returning `None` when it does not match.
    pub fn strip_symbol_prefix(&self, prefix: &[&str]) -> Option<Relation> {
        if self.signature.len() < prefix.len() {
            return None;
        }
        for (segment, name) in self.signature.iter().zip(prefix) {
            if segment.symbol_name() != Some(name) {
                return None;
            }
        }
        Some(Relation {
            signature: self.signature[prefix.len()..].to_vec(),
            types: self.types[prefix.len()..].to_vec(),
            columns: self.columns.clone(),
        })
    }
}

/// An ordered list of relations, as returned by one query execution.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RelationSet {
    pub relations: Vec<Relation>,
}

impl RelationSet {
    pub fn new(relations: Vec<Relation>) -> Self {
        Self { relations }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Relation> {
        self.relations.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    /// Relations under a symbolic prefix, with the prefix stripped.
    pub fn under_prefix(&self, prefix: &[&str]) -> Vec<Relation> {
        self.relations
            .iter()
            .filter_map(|relation| relation.strip_symbol_prefix(prefix))
            .collect()
    }
}

impl<'a> IntoIterator for &'a RelationSet {
    type Item = &'a Relation;
    type IntoIter = std::slice::Iter<'a, Relation>;

    fn into_iter(self) -> Self::IntoIter {
        self.relations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::parse_signature;

    fn relation(path: &str, columns: Vec<Vec<RelValue>>) -> Relation {
        Relation::new(parse_signature(path).unwrap(), columns).unwrap()
    }

    #[test]
    fn arity_counts_constants() {
        let rel = relation(
            "/:[]/Int64/Int64",
            vec![
                vec![RelValue::Int(1), RelValue::Int(2)],
                vec![RelValue::Int(10), RelValue::Int(20)],
            ],
        );
        assert_eq!(rel.arity(), 3);
        assert_eq!(rel.row_count(), 2);
    }

    #[test]
    fn expanded_row_materializes_constants() {
        let rel = relation("/:a/Int64", vec![vec![RelValue::Int(5)]]);
        let row = rel.expanded_row(0);
        assert_eq!(row.len(), 2);
        assert_eq!(row[0].value, RelValue::Text("a".to_string()));
        assert_eq!(row[1].value, RelValue::Int(5));
    }

    #[test]
    fn pure_constant_relation_has_one_row() {
        let rel = relation("/:a/:b", vec![]);
        assert_eq!(rel.row_count(), 1);
        assert_eq!(rel.expanded_row(0).len(), 2);
    }

    #[test]
    fn column_count_mismatch_rejected() {
        let err = Relation::new(parse_signature("/:a/Int64").unwrap(), vec![]).unwrap_err();
        assert!(matches!(err, WireError::ColumnCount { expected: 1, .. }));
    }

    #[test]
    fn strip_symbol_prefix_drops_metadata_too() {
        let rel = relation(
            "/:rel/:catalog/:diagnostic/:code/Int64/String",
            vec![
                vec![RelValue::Int(1)],
                vec![RelValue::Text("X1".to_string())],
            ],
        );
        let stripped = rel.strip_symbol_prefix(&DIAGNOSTIC_PREFIX).unwrap();
        assert_eq!(stripped.signature.len(), 3);
        assert_eq!(stripped.types.len(), 3);
        assert_eq!(stripped.columns, rel.columns);
        assert!(rel.strip_symbol_prefix(&IC_VIOLATION_PREFIX).is_none());
    }
}
