//! Path segments of a relation signature.
//!
//! A relation identifies itself with a `/`-joined path such as
//! `/:output/:[]/Int64/String`. Each component is one [`Segment`]: a symbolic
//! constant (`:name`), the array marker (`:[]`), the missing type
//! (`Missing`), or a primitive type name (`Int64`, `String`, ...).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::WireError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name")]
pub enum Segment {
    /// Symbolic string constant, e.g. `:output`. Stored without the `:`.
    Symbol(String),
    /// The `:[]` marker: the next column indexes into a collection.
    ArrayMarker,
    /// Primitive type name, e.g. `Int64`. Has a data column.
    Primitive(String),
    /// The `Missing` type. Has a data column carrying a placeholder.
    Missing,
}

impl Segment {
    pub fn parse(component: &str) -> Option<Segment> {
        if component.is_empty() {
            return None;
        }
        if component == ":[]" {
            return Some(Segment::ArrayMarker);
        }
        if let Some(name) = component.strip_prefix(':') {
            if name.is_empty() {
                return None;
            }
            return Some(Segment::Symbol(name.to_string()));
        }
        if component == "Missing" {
            return Some(Segment::Missing);
        }
        Some(Segment::Primitive(component.to_string()))
    }

    /// Constants are encoded entirely in the signature and carry no data
    /// column; primitives and `Missing` each own one column.
    pub fn is_constant(&self) -> bool {
        matches!(self, Segment::Symbol(_) | Segment::ArrayMarker)
    }

    /// True for the 128-bit hash types used as violation identities.
    pub fn is_hash(&self) -> bool {
        matches!(self, Segment::Primitive(name) if name == "Hash" || name == "UInt128")
    }

    pub fn symbol_name(&self) -> Option<&str> {
        match self {
            Segment::Symbol(name) => Some(name),
            Segment::ArrayMarker | Segment::Primitive(_) | Segment::Missing => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Symbol(name) => write!(f, ":{name}"),
            Segment::ArrayMarker => write!(f, ":[]"),
            Segment::Primitive(name) => write!(f, "{name}"),
            Segment::Missing => write!(f, "Missing"),
        }
    }
}

/// Parse a `/`-joined signature path. A leading `/` is optional.
pub fn parse_signature(path: &str) -> Result<Vec<Segment>, WireError> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    trimmed
        .split('/')
        .map(|component| {
            Segment::parse(component).ok_or_else(|| WireError::EmptySegment {
                path: path.to_string(),
            })
        })
        .collect()
}

/// Render a signature back to its `/`-joined path form.
pub fn format_signature(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        out.push('/');
        out.push_str(&segment.to_string());
    }
    out
}
