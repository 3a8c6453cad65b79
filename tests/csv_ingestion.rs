use pretty_assertions::assert_eq;

use rowkit::ingestion::csv::{ingest_csv_from_path, ingest_csv_from_reader};
use rowkit::row;
use rowkit::types::Value;

#[test]
fn ingest_csv_from_path_happy_path() {
    let ds = ingest_csv_from_path("tests/fixtures/timesheet.csv", true).unwrap();

    assert_eq!(ds.row_count(), 4);
    assert_eq!(
        ds.rows[0],
        row! { "project" => "A", "user" => "Anna", "hours" => 2, "cost" => 100 }
    );
}

#[test]
fn ingested_rows_feed_group_by() {
    let ds = ingest_csv_from_path("tests/fixtures/timesheet.csv", true).unwrap();
    let report = ds.group_by("project", ["hours", "cost"]).unwrap();
    assert_eq!(
        report,
        vec![
            row! { "project" => "A", "hours" => 6, "cost" => 450 },
            row! { "project" => "B", "hours" => 4, "cost" => 300 },
        ]
    );
}

#[test]
fn ingest_csv_without_inference_keeps_text() {
    let ds = ingest_csv_from_path("tests/fixtures/timesheet.csv", false).unwrap();
    assert_eq!(ds.rows[3].get("hours"), Some(&Value::Utf8("4".to_string())));

    // Text columns cannot be summed.
    let err = ds.group_by("project", "hours").unwrap_err();
    assert!(err.to_string().contains("cannot apply 'sum' to utf8"));
}

#[test]
fn ingest_csv_mixes_numbers_text_and_nulls() {
    let input = "id,score,label\n1,98.5,x\n2,,7up\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let ds = ingest_csv_from_reader(&mut rdr, true).unwrap();
    assert_eq!(
        ds,
        vec![
            row! { "id" => 1, "score" => 98.5, "label" => "x" },
            row! { "id" => 2, "score" => Value::Null, "label" => "7up" },
        ]
    );
}

#[test]
fn ingest_csv_errors_on_duplicate_header() {
    let input = "id,id\n1,2\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let err = ingest_csv_from_reader(&mut rdr, true).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("schema mismatch"));
    assert!(msg.contains("duplicate column 'id'"));
}

#[test]
fn ingest_csv_errors_on_ragged_record() {
    let err = ingest_csv_from_path("tests/fixtures/ragged.csv", true).unwrap_err();
    assert!(err.to_string().starts_with("csv error"));
}
