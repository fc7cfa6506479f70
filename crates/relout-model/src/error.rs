use thiserror::Error;

/// Errors raised while parsing a relation dump into a [`crate::RelationSet`].
#[derive(Debug, Error)]
pub enum WireError {
    #[error("relation {path}: empty path segment")]
    EmptySegment { path: String },
    #[error("relation {path}: expected a JSON array of columns")]
    NotColumnar { path: String },
    #[error("relation {path}: signature has {expected} data columns, dump has {found}")]
    ColumnCount {
        path: String,
        expected: usize,
        found: usize,
    },
    #[error("relation {path}: columns have unequal lengths")]
    RaggedColumns { path: String },
    #[error("relation {path}, column {column}: unsupported wire value {value}")]
    BadValue {
        path: String,
        column: usize,
        value: String,
    },
    #[error("relation dump must be a JSON object keyed by relation paths")]
    NotAnObject,
    #[error("invalid relation dump: {0}")]
    Json(#[from] serde_json::Error),
}
