use std::sync::{Arc, Mutex};

use rowkit::ingestion::{
    ingest_from_path, CompositeObserver, IngestionContext, IngestionFormat, IngestionObserver, IngestionOptions,
    IngestionSeverity, IngestionStats,
};
use rowkit::RowError;

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<usize>>,
    fields: Mutex<Vec<usize>>,
    failures: Mutex<Vec<IngestionSeverity>>,
    alerts: Mutex<Vec<IngestionSeverity>>,
}

impl IngestionObserver for RecordingObserver {
    fn on_success(&self, _ctx: &IngestionContext, stats: IngestionStats) {
        self.successes.lock().unwrap().push(stats.rows);
        self.fields.lock().unwrap().push(stats.fields);
    }

    fn on_failure(&self, _ctx: &IngestionContext, severity: IngestionSeverity, _error: &RowError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &IngestionContext, severity: IngestionSeverity, _error: &RowError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn options(obs: &Arc<RecordingObserver>, format: Option<IngestionFormat>) -> IngestionOptions {
    IngestionOptions {
        format,
        observer: Some(obs.clone()),
        alert_at_or_above: IngestionSeverity::Critical,
        ..Default::default()
    }
}

#[test]
fn observer_receives_row_count_on_success() {
    let obs = Arc::new(RecordingObserver::default());
    let rows = ingest_from_path("tests/fixtures/timesheet.csv", &options(&obs, None)).unwrap();

    assert_eq!(rows.len(), 4);
    assert_eq!(*obs.successes.lock().unwrap(), vec![4]);
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_failure_and_alert_on_critical_io_error() {
    let obs = Arc::new(RecordingObserver::default());

    // Missing file -> Io error -> Critical
    let _ = ingest_from_path(
        "tests/fixtures/does_not_exist.csv",
        &options(&obs, Some(IngestionFormat::Csv)),
    )
    .unwrap_err();

    assert_eq!(*obs.failures.lock().unwrap(), vec![IngestionSeverity::Critical]);
    assert_eq!(*obs.alerts.lock().unwrap(), vec![IngestionSeverity::Critical]);
}

#[test]
fn observer_receives_failure_without_alert_for_malformed_content() {
    let obs = Arc::new(RecordingObserver::default());

    // Ragged record -> csv parse error -> Error severity (not Critical) -> no alert
    let _ = ingest_from_path("tests/fixtures/ragged.csv", &options(&obs, None)).unwrap_err();

    assert_eq!(*obs.failures.lock().unwrap(), vec![IngestionSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn lower_threshold_alerts_on_plain_errors() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = IngestionOptions {
        alert_at_or_above: IngestionSeverity::Error,
        ..options(&obs, Some(IngestionFormat::Json))
    };

    // A CSV file decoded as JSON is a syntax error, not an I/O failure.
    let _ = ingest_from_path("tests/fixtures/timesheet.csv", &opts).unwrap_err();

    assert_eq!(*obs.failures.lock().unwrap(), vec![IngestionSeverity::Error]);
    assert_eq!(*obs.alerts.lock().unwrap(), vec![IngestionSeverity::Error]);
}

#[test]
fn composite_observer_fans_out_to_every_observer() {
    let first = Arc::new(RecordingObserver::default());
    let second = Arc::new(RecordingObserver::default());
    let composite = CompositeObserver::default()
        .with(first.clone())
        .with(second.clone());
    let opts = IngestionOptions::default().with_observer(Arc::new(composite));

    ingest_from_path("tests/fixtures/roles.ndjson", &opts).unwrap();

    for obs in [&first, &second] {
        assert_eq!(*obs.successes.lock().unwrap(), vec![2]);
        assert_eq!(*obs.fields.lock().unwrap(), vec![3]);
    }
}

#[test]
fn unknown_extension_is_not_reported() {
    let obs = Arc::new(RecordingObserver::default());
    let _ = ingest_from_path("tests/fixtures/notes.txt", &options(&obs, None)).unwrap_err();

    assert!(obs.successes.lock().unwrap().is_empty());
    assert!(obs.failures.lock().unwrap().is_empty());
}
