use relout_model::parse_dump;
use relout_report::{Severity, assemble_diagnostics};

#[test]
fn zips_fields_and_drops_gap_ordinals() {
    // Fields present at ordinals 1 and 3; ordinal 2 never referenced.
    let set = parse_dump(
        r#"{
            "/:rel/:catalog/:diagnostic/:code/Int64/String": [[1, 3], ["X1", "X3"]],
            "/:rel/:catalog/:diagnostic/:message/Int64/String": [[1, 3], ["first", "third"]],
            "/:rel/:catalog/:diagnostic/:severity/Int64/String": [[1, 3], ["warning", "error"]],
            "/:rel/:catalog/:diagnostic/:range/:start/:line/Int64/Int64/Int64": [[1, 3], [1, 1], [5, 2]],
            "/:rel/:catalog/:diagnostic/:range/:start/:character/Int64/Int64/Int64": [[1, 3], [1, 1], [0, 7]],
            "/:rel/:catalog/:diagnostic/:range/:end/:line/Int64/Int64/Int64": [[1, 3], [1, 1], [5, 2]],
            "/:rel/:catalog/:diagnostic/:range/:end/:character/Int64/Int64/Int64": [[1, 3], [1, 1], [9, 9]]
        }"#,
    )
    .unwrap();

    let diagnostics = assemble_diagnostics(&set);
    assert_eq!(diagnostics.len(), 2);

    // Sorted by (start.line, start.character): ordinal 3 starts on line 2.
    assert_eq!(diagnostics[0].code, "X3");
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert_eq!(diagnostics[0].ranges[0].start.line, 2);
    assert_eq!(diagnostics[0].ranges[0].start.character, 7);

    assert_eq!(diagnostics[1].code, "X1");
    assert_eq!(diagnostics[1].message, "first");
    assert_eq!(diagnostics[1].severity, Severity::Warning);
    assert_eq!(diagnostics[1].ranges[0].start.line, 5);
}

#[test]
fn one_diagnostic_may_own_several_ranges() {
    let set = parse_dump(
        r#"{
            "/:rel/:catalog/:diagnostic/:message/Int64/String": [[1], ["two places"]],
            "/:rel/:catalog/:diagnostic/:range/:start/:line/Int64/Int64/Int64": [[1, 1], [1, 2], [3, 8]],
            "/:rel/:catalog/:diagnostic/:range/:end/:line/Int64/Int64/Int64": [[1, 1], [1, 2], [3, 8]]
        }"#,
    )
    .unwrap();

    let diagnostics = assemble_diagnostics(&set);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].ranges.len(), 2);
    assert_eq!(diagnostics[0].ranges[0].start.line, 3);
    assert_eq!(diagnostics[0].ranges[1].start.line, 8);
}

#[test]
fn rangeless_diagnostics_sort_first() {
    let set = parse_dump(
        r#"{
            "/:rel/:catalog/:diagnostic/:message/Int64/String": [[1, 2], ["ranged", "global"]],
            "/:rel/:catalog/:diagnostic/:range/:start/:line/Int64/Int64/Int64": [[1], [1], [10]]
        }"#,
    )
    .unwrap();

    let diagnostics = assemble_diagnostics(&set);
    assert_eq!(diagnostics[0].message, "global");
    assert_eq!(diagnostics[1].message, "ranged");
}

#[test]
fn unknown_fields_and_bad_rows_are_skipped() {
    let set = parse_dump(
        r#"{
            "/:rel/:catalog/:diagnostic/:message/Int64/String": [[1, 0], ["kept", "dropped"]],
            "/:rel/:catalog/:diagnostic/:mystery/Int64/String": [[1], ["?"]],
            "/:rel/:catalog/:diagnostic/:severity/Int64/String": [[1], ["surprising"]]
        }"#,
    )
    .unwrap();

    let diagnostics = assemble_diagnostics(&set);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "kept");
    // Unknown severity falls back to error rather than failing the decode.
    assert_eq!(diagnostics[0].severity, Severity::Error);
}

#[test]
fn unrelated_relations_are_ignored() {
    let set = parse_dump(
        r#"{
            "/:a/Int64": [[5]],
            "/:rel/:catalog/:diagnostic/:message/Int64/String": [[1], ["only one"]]
        }"#,
    )
    .unwrap();
    assert_eq!(assemble_diagnostics(&set).len(), 1);
}

#[test]
fn assembly_is_pure() {
    let set = parse_dump(
        r#"{"/:rel/:catalog/:diagnostic/:message/Int64/String": [[1], ["m"]]}"#,
    )
    .unwrap();
    let before = set.clone();
    let first = assemble_diagnostics(&set);
    let second = assemble_diagnostics(&set);
    assert_eq!(first, second);
    assert_eq!(set, before);
}
