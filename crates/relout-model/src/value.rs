//! Scalar wire values and typed values.

use std::fmt;

use serde::ser::{Serialize, Serializer};

use crate::typedef::TypeDef;

/// One scalar cell from a relation column.
///
/// 128-bit values are carried separately from `Int` because content hashes
/// do not fit a JSON number; they arrive as decimal strings on the wire and
/// are rendered back as strings.
#[derive(Debug, Clone, PartialEq)]
pub enum RelValue {
    Null,
    Bool(bool),
    Int(i64),
    Uint128(u128),
    Float(f64),
    Text(String),
}

impl RelValue {
    /// Canonical display form, used for path keys and pivot row identity.
    pub fn display_form(&self) -> String {
        match self {
            RelValue::Null => "null".to_string(),
            RelValue::Bool(b) => b.to_string(),
            RelValue::Int(v) => v.to_string(),
            RelValue::Uint128(v) => v.to_string(),
            RelValue::Float(v) => v.to_string(),
            RelValue::Text(s) => s.clone(),
        }
    }

    /// Interpret a 1-based wire index as a zero-based array index.
    ///
    /// Returns `None` for anything that is not a positive integer; callers
    /// fall back to the row ordinal in that case.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            RelValue::Int(v) if *v >= 1 => usize::try_from(*v - 1).ok(),
            RelValue::Uint128(v) if *v >= 1 => usize::try_from(*v - 1).ok(),
            RelValue::Float(v) if *v >= 1.0 && v.fract() == 0.0 && *v <= u64::MAX as f64 => {
                usize::try_from(*v as u64 - 1).ok()
            }
            RelValue::Null
            | RelValue::Bool(_)
            | RelValue::Int(_)
            | RelValue::Uint128(_)
            | RelValue::Float(_)
            | RelValue::Text(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RelValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u128(&self) -> Option<u128> {
        match self {
            RelValue::Uint128(v) => Some(*v),
            RelValue::Int(v) if *v >= 0 => Some(*v as u128),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            RelValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Convert to a JSON value. 128-bit values wider than `u64` become
    /// decimal strings; non-finite floats become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            RelValue::Null => serde_json::Value::Null,
            RelValue::Bool(b) => serde_json::Value::Bool(*b),
            RelValue::Int(v) => serde_json::Value::from(*v),
            RelValue::Uint128(v) => match u64::try_from(*v) {
                Ok(narrow) => serde_json::Value::from(narrow),
                Err(_) => serde_json::Value::String(v.to_string()),
            },
            RelValue::Float(v) => serde_json::Number::from_f64(*v)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            RelValue::Text(s) => serde_json::Value::String(s.clone()),
        }
    }
}

impl fmt::Display for RelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_form())
    }
}

impl Serialize for RelValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// A value paired with its classified column type.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TypedValue {
    #[serde(rename = "type")]
    pub type_def: TypeDef,
    pub value: RelValue,
}

impl TypedValue {
    pub fn new(type_def: TypeDef, value: RelValue) -> Self {
        Self { type_def, value }
    }

    /// Display form that keeps symbols distinguishable from string
    /// literals: constants render with their `:` prefix.
    pub fn display_form(&self) -> String {
        match &self.type_def {
            TypeDef::Constant { symbol } => format!(":{symbol}"),
            TypeDef::Primitive { .. } | TypeDef::Missing | TypeDef::SyntheticBool => {
                self.value.display_form()
            }
        }
    }
}
