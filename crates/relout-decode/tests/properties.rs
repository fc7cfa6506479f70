//! Property tests: decoding is deterministic and never mutates its input.

use proptest::prelude::*;
use relout_decode::decode_json;
use relout_model::{RelValue, Relation, RelationSet, parse_signature};

fn array_relation(indices: Vec<i64>, values: Vec<i64>) -> Relation {
    let len = indices.len().min(values.len());
    Relation::new(
        parse_signature("/:[]/Int64/Int64").unwrap(),
        vec![
            indices[..len].iter().copied().map(RelValue::Int).collect(),
            values[..len].iter().copied().map(RelValue::Int).collect(),
        ],
    )
    .unwrap()
}

fn object_relation(keys: Vec<String>, values: Vec<i64>) -> Relation {
    let len = keys.len().min(values.len());
    Relation::new(
        parse_signature("/:data/String/Int64").unwrap(),
        vec![
            keys[..len].iter().cloned().map(RelValue::Text).collect(),
            values[..len].iter().copied().map(RelValue::Int).collect(),
        ],
    )
    .unwrap()
}

proptest! {
    #[test]
    fn array_decode_is_deterministic(
        indices in proptest::collection::vec(1i64..64, 0..16),
        values in proptest::collection::vec(any::<i64>(), 0..16),
    ) {
        let set = RelationSet::new(vec![array_relation(indices, values)]);
        let before = set.clone();
        let first = decode_json(&set).unwrap();
        let second = decode_json(&set).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(set, before);
    }

    #[test]
    fn object_decode_is_deterministic(
        keys in proptest::collection::vec("[a-z]{1,6}", 0..12),
        values in proptest::collection::vec(any::<i64>(), 0..12),
    ) {
        let set = RelationSet::new(vec![object_relation(keys, values)]);
        let before = set.clone();
        let first = decode_json(&set).unwrap();
        let second = decode_json(&set).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(set, before);
    }
}
