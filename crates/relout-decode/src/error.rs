use thiserror::Error;

/// Fatal decode failures. There is no partial result: callers surface a
/// decode-failure state instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Some relation roots are the array marker and some are not; the
    /// result cannot be both an array and an object.
    #[error("cannot mix array and non-array roots in one decode")]
    InconsistentRootArray,
    /// A relation signature that cannot be decoded into a JSON path.
    #[error("relation {signature} cannot be decoded as JSON")]
    InvalidJsonSchema { signature: String },
}
