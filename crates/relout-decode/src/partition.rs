//! Partitioning relations into named display buckets.

use std::collections::BTreeMap;

use relout_model::{Relation, RelationSet};
use tracing::debug;

/// Bucket for relations whose leading segment is not a symbolic constant.
pub const DEFAULT_BUCKET: &str = "output";

/// Bucket each relation by its leading symbolic constant.
///
/// Members of a non-default bucket are rewritten with the leading segment
/// dropped from the signature and the matching entry dropped from the
/// parallel type metadata, so downstream consumers see them as if the
/// partition prefix never existed. The array marker is not a string
/// constant and lands in the default bucket, as does everything else
/// without a symbolic root. The default bucket is always present.
pub fn group_relations(set: &RelationSet) -> BTreeMap<String, Vec<Relation>> {
    let mut buckets: BTreeMap<String, Vec<Relation>> = BTreeMap::new();
    buckets.insert(DEFAULT_BUCKET.to_string(), Vec::new());
    for relation in set {
        match relation.leading_symbol() {
            Some(name) => {
                buckets
                    .entry(name.to_string())
                    .or_default()
                    .push(relation.strip_leading());
            }
            None => {
                if let Some(bucket) = buckets.get_mut(DEFAULT_BUCKET) {
                    bucket.push(relation.clone());
                }
            }
        }
    }
    debug!(buckets = buckets.len(), "partitioned relations");
    buckets
}
