//! Pivot table reconstruction.
//!
//! Rebuilds a 2D cross-tab from relations under `/:rel/:table/:data`. The
//! first position of each relation names a pivot column (a symbolic
//! constant, or a literal column giving a per-row key), the last position
//! carries the cell value, and the middle positions form a composite row
//! header. Relations of arity 2 omit the value column and mark boolean
//! presence instead.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use relout_model::{RelValue, Relation, RelationSet, TABLE_DATA_PREFIX, TypeDef, TypedValue};

/// Separator for joining header display forms into a row merge key.
const ROW_KEY_SEPARATOR: &str = "\u{1f}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PivotColumnKind {
    /// Synthetic column carrying one position of the row-header tuple.
    RowHeader { position: usize },
    /// A value column keyed by a column-key value's display form.
    Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PivotColumn {
    pub id: String,
    pub kind: PivotColumnKind,
}

/// One physical row: its merge key, the header tuple, and sparse cells
/// keyed by value-column id. A cell absent from the map was never written;
/// that is not the same as a false or null cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotRow {
    pub key: String,
    pub headers: Vec<TypedValue>,
    pub cells: BTreeMap<String, TypedValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PivotTable {
    pub rows: Vec<PivotRow>,
    pub columns: Vec<PivotColumn>,
    pub errors: Vec<String>,
}

impl PivotTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Build the pivot table from the relation set.
///
/// Malformed sub-relations are collected as errors without failing the
/// decode; the table still contains every row that could be decoded. Rows
/// and value columns are both ordered by first appearance, and rows from
/// different relations sharing identical header values coalesce into one
/// physical row.
pub fn build_pivot(set: &RelationSet) -> PivotTable {
    let mut errors = Vec::new();
    let mut qualifying = Vec::new();
    for relation in set.under_prefix(&TABLE_DATA_PREFIX) {
        if relation.arity() < 2 {
            errors.push(format!(
                "table relation {} has arity {}; expected at least 2",
                relation.path(),
                relation.arity()
            ));
            continue;
        }
        qualifying.push(relation);
    }
    if qualifying.is_empty() {
        if errors.is_empty() {
            errors.push("no table data relations to decode".to_string());
        }
        return PivotTable {
            errors,
            ..PivotTable::default()
        };
    }

    let max_header_arity = qualifying.iter().map(header_arity).max().unwrap_or(0);

    let mut columns: Vec<PivotColumn> = (0..max_header_arity)
        .map(|position| PivotColumn {
            id: format!("header{position}"),
            kind: PivotColumnKind::RowHeader { position },
        })
        .collect();
    let mut seen_keys: HashSet<String> = HashSet::new();
    let mut rows: Vec<PivotRow> = Vec::new();
    let mut row_index: HashMap<String, usize> = HashMap::new();

    for relation in &qualifying {
        let arity = relation.arity();
        for row in 0..relation.row_count() {
            let tuple = relation.expanded_row(row);
            let column_key = tuple[0].display_form();
            let headers: &[TypedValue] = if arity == 2 {
                &tuple[1..]
            } else {
                &tuple[1..arity - 1]
            };
            let cell = if arity == 2 {
                TypedValue::new(TypeDef::SyntheticBool, RelValue::Bool(true))
            } else {
                tuple[arity - 1].clone()
            };

            if seen_keys.insert(column_key.clone()) {
                columns.push(PivotColumn {
                    id: column_key.clone(),
                    kind: PivotColumnKind::Value,
                });
            }

            let merge_key = headers
                .iter()
                .map(TypedValue::display_form)
                .collect::<Vec<_>>()
                .join(ROW_KEY_SEPARATOR);
            let index = *row_index.entry(merge_key.clone()).or_insert_with(|| {
                rows.push(PivotRow {
                    key: merge_key.clone(),
                    headers: headers.to_vec(),
                    cells: BTreeMap::new(),
                });
                rows.len() - 1
            });
            rows[index].cells.insert(column_key, cell);
        }
    }

    debug!(
        rows = rows.len(),
        columns = columns.len(),
        errors = errors.len(),
        "built pivot table"
    );
    PivotTable {
        rows,
        columns,
        errors,
    }
}

/// Header positions contributed by one relation: everything between the
/// column key and the value, or the single trailing position for arity 2.
fn header_arity(relation: &Relation) -> usize {
    match relation.arity() {
        0 | 1 => 0,
        2 => 1,
        arity => arity - 2,
    }
}
