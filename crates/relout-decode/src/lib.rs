pub mod error;
pub mod json;
pub mod partition;
pub mod path;

pub use error::SchemaError;
pub use json::decode_json;
pub use partition::{DEFAULT_BUCKET, group_relations};
pub use path::{PathKey, row_path};
