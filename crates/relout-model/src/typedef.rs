//! Column type classification.

use serde::{Deserialize, Serialize};

use crate::segment::Segment;

/// Symbol name carried by the array marker once classified as a constant.
pub const ARRAY_MARKER_SYMBOL: &str = "[]";

/// The closed set of column types a decoder may see. Every decode site
/// matches exhaustively on this; there is no catch-all branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TypeDef {
    /// A symbolic constant column. The array marker is the constant `[]`.
    Constant { symbol: String },
    /// A primitive-typed data column (`Int64`, `String`, `Float64`, ...).
    Primitive { name: String },
    /// The `Missing` placeholder type.
    Missing,
    /// Synthesized by the pivot builder for presence-only cells; never
    /// appears on the wire.
    SyntheticBool,
}

impl TypeDef {
    pub fn classify(segment: &Segment) -> TypeDef {
        match segment {
            Segment::Symbol(name) => TypeDef::Constant {
                symbol: name.clone(),
            },
            Segment::ArrayMarker => TypeDef::Constant {
                symbol: ARRAY_MARKER_SYMBOL.to_string(),
            },
            Segment::Primitive(name) => TypeDef::Primitive { name: name.clone() },
            Segment::Missing => TypeDef::Missing,
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, TypeDef::Constant { .. })
    }

    pub fn is_array_marker(&self) -> bool {
        matches!(self, TypeDef::Constant { symbol } if symbol == ARRAY_MARKER_SYMBOL)
    }
}
