use pretty_assertions::assert_eq;

use rowkit::ingestion::json::{ingest_json_from_path, ingest_json_from_str};
use rowkit::row;
use rowkit::types::Value;
use rowkit::ErrorKind;

#[test]
fn ingest_json_array_from_path() {
    let ds = ingest_json_from_path("tests/fixtures/timesheet.json").unwrap();
    assert_eq!(ds.row_count(), 4);
    assert_eq!(
        ds.rows[2],
        row! { "project" => "A", "user" => "Ivan", "hours" => 3, "cost" => 200 }
    );
}

#[test]
fn json_and_csv_fixtures_agree() {
    let from_json = ingest_json_from_path("tests/fixtures/timesheet.json").unwrap();
    let from_csv = rowkit::ingestion::csv::ingest_csv_from_path("tests/fixtures/timesheet.csv", true).unwrap();
    assert_eq!(from_json, from_csv);
}

#[test]
fn ndjson_keeps_nested_objects() {
    let ds = ingest_json_from_path("tests/fixtures/roles.ndjson").unwrap();
    assert_eq!(
        ds,
        vec![
            row! { "user" => "Anna", "role" => "Lead", "team" => row! { "name" => "core" } },
            row! { "user" => "Ivan", "role" => "Dev" },
        ]
    );
}

#[test]
fn nested_values_cannot_be_distinct_keys() {
    let ds = ingest_json_from_path("tests/fixtures/roles.ndjson").unwrap();
    // Projection drops Ivan's missing team to null, Anna's team is a map.
    let err = ds.distinct("team").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);

    // Other columns stay usable.
    assert_eq!(ds.distinct("role").unwrap().len(), 2);
}

#[test]
fn arrays_are_rejected() {
    let err = ingest_json_from_str(r#"[{"tags": ["a", "b"]}]"#).unwrap_err();
    assert!(err.to_string().contains("arrays are not supported"));
}

#[test]
fn large_unsigned_numbers_become_floats() {
    let ds = ingest_json_from_str(r#"{"big": 18446744073709551615}"#).unwrap();
    assert!(matches!(ds.rows[0].get("big"), Some(Value::Float64(_))));
}
