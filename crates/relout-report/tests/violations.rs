use relout_model::{RelValue, parse_dump};
use relout_report::assemble_ic_violations;

#[test]
fn groups_fields_by_hash() {
    let set = parse_dump(
        r#"{
            "/:rel/:catalog/:ic_violation/:decl_id/Hash/String": [["111", "222"], ["c1", "c2"]],
            "/:rel/:catalog/:ic_violation/:name/Hash/String": [["111"], ["first_ic"]],
            "/:rel/:catalog/:ic_violation/:report/Hash/String": [["111", "222"], ["r1", "r2"]],
            "/:rel/:catalog/:ic_violation/:range/:start/:line/Hash/Int64": [["111", "222"], [4, 2]],
            "/:rel/:catalog/:ic_violation/:range/:start/:character/Hash/Int64": [["111", "222"], [0, 6]],
            "/:rel/:catalog/:ic_violation/:range/:end/:line/Hash/Int64": [["111", "222"], [4, 2]]
        }"#,
    )
    .unwrap();

    let violations = assemble_ic_violations(&set);
    assert_eq!(violations.len(), 2);

    // Sorted by (range.start.line, range.start.character).
    assert_eq!(violations[0].hash, 222);
    assert_eq!(violations[0].decl_id, "c2");
    assert_eq!(violations[0].name, None);
    assert_eq!(violations[0].range.unwrap().start.line, 2);
    assert!(violations[0].output.is_empty());

    assert_eq!(violations[1].hash, 111);
    assert_eq!(violations[1].name.as_deref(), Some("first_ic"));
    assert_eq!(violations[1].report, "r1");
}

#[test]
fn output_runs_stay_within_their_hash() {
    // Two output schemas arrive as separate relations; each is sorted by
    // hash and grouped independently.
    let set = parse_dump(
        r#"{
            "/:rel/:catalog/:ic_violation/:decl_id/Hash/String": [["111", "222"], ["a", "b"]],
            "/:rel/:catalog/:ic_violation/:output/Hash/Int64": [["111", "111", "222"], [1, 2, 3]],
            "/:rel/:catalog/:ic_violation/:output/Hash/String/Int64": [["111", "222", "222"], ["x", "y", "z"], [7, 8, 9]]
        }"#,
    )
    .unwrap();

    let violations = assemble_ic_violations(&set);
    assert_eq!(violations.len(), 2);

    let first = violations.iter().find(|v| v.hash == 111).unwrap();
    assert_eq!(first.output.len(), 2);
    assert_eq!(
        first.output[0].columns,
        vec![vec![RelValue::Int(1), RelValue::Int(2)]]
    );
    assert_eq!(
        first.output[1].columns,
        vec![
            vec![RelValue::Text("x".to_string())],
            vec![RelValue::Int(7)]
        ]
    );

    let second = violations.iter().find(|v| v.hash == 222).unwrap();
    assert_eq!(second.output.len(), 2);
    assert_eq!(second.output[0].columns, vec![vec![RelValue::Int(3)]]);
    assert_eq!(
        second.output[1].columns,
        vec![
            vec![RelValue::Text("y".to_string()), RelValue::Text("z".to_string())],
            vec![RelValue::Int(8), RelValue::Int(9)]
        ]
    );
}

#[test]
fn output_signature_is_the_schema_suffix() {
    let set = parse_dump(
        r#"{
            "/:rel/:catalog/:ic_violation/:output/Hash/String/Int64": [["111"], ["x"], [1]]
        }"#,
    )
    .unwrap();

    let violations = assemble_ic_violations(&set);
    assert_eq!(violations.len(), 1);
    let table = &violations[0].output[0];
    assert_eq!(table.path(), "/String/Int64");
    assert_eq!(table.row_count(), 1);
}

#[test]
fn wide_hashes_key_distinct_violations() {
    let wide_a = u128::from(u64::MAX) + 1;
    let wide_b = u128::from(u64::MAX) + 2;
    let dump = format!(
        r#"{{"/:rel/:catalog/:ic_violation/:decl_id/Hash/String": [["{wide_a}", "{wide_b}"], ["a", "b"]]}}"#
    );
    let set = parse_dump(&dump).unwrap();
    let violations = assemble_ic_violations(&set);
    assert_eq!(violations.len(), 2);
}

#[test]
fn hashes_serialize_as_hex() {
    let set = parse_dump(
        r#"{"/:rel/:catalog/:ic_violation/:decl_id/Hash/String": [["255"], ["c"]]}"#,
    )
    .unwrap();
    let violations = assemble_ic_violations(&set);
    let json = serde_json::to_value(&violations).unwrap();
    assert_eq!(
        json[0]["hash"],
        serde_json::json!("000000000000000000000000000000ff")
    );
}

#[test]
fn assembly_is_pure() {
    let set = parse_dump(
        r#"{
            "/:rel/:catalog/:ic_violation/:report/Hash/String": [["9"], ["r"]],
            "/:rel/:catalog/:ic_violation/:output/Hash/Int64": [["9", "9"], [1, 2]]
        }"#,
    )
    .unwrap();
    let before = set.clone();
    let first = assemble_ic_violations(&set);
    let second = assemble_ic_violations(&set);
    assert_eq!(first, second);
    assert_eq!(set, before);
}
