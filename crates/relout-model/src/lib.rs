pub mod error;
pub mod relation;
pub mod segment;
pub mod typedef;
pub mod value;
pub mod wire;

pub use error::WireError;
pub use relation::{
    DIAGNOSTIC_PREFIX, IC_VIOLATION_PREFIX, Relation, RelationSet, TABLE_DATA_PREFIX,
};
pub use segment::{Segment, format_signature, parse_signature};
pub use typedef::{ARRAY_MARKER_SYMBOL, TypeDef};
pub use value::{RelValue, TypedValue};
pub use wire::{parse_dump, relation_set_from_json};
