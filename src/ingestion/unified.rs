//! Path-based ingestion with format detection and outcome reporting.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{RowError, RowResult};
use crate::types::RowSequence;

use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};
use super::{csv, json};

/// Input formats understood by [`ingest_from_path`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionFormat {
    /// Header row followed by records.
    Csv,
    /// Array of objects, single object, or one object per line.
    Json,
}

impl IngestionFormat {
    /// `csv`, `json`, `ndjson` and `jsonl`, in any case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        const KNOWN: [(&str, IngestionFormat); 4] = [
            ("csv", IngestionFormat::Csv),
            ("json", IngestionFormat::Json),
            ("ndjson", IngestionFormat::Json),
            ("jsonl", IngestionFormat::Json),
        ];
        KNOWN
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(ext))
            .map(|(_, format)| *format)
    }

    /// Detect the format of `path` from its extension.
    pub fn from_path(path: &Path) -> RowResult<Self> {
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            return Err(RowError::SchemaMismatch {
                message: format!("cannot infer format: {} has no extension", path.display()),
            });
        };
        Self::from_extension(ext).ok_or_else(|| RowError::SchemaMismatch {
            message: format!(
                "cannot infer format from extension '{ext}' of {}",
                path.display()
            ),
        })
    }
}

/// Knobs for [`ingest_from_path`]. The [`Default`] detects the format, infers CSV cell types,
/// reports to nobody and alerts only on critical failures.
#[derive(Clone)]
pub struct IngestionOptions {
    /// Forced format; `None` detects it from the extension.
    pub format: Option<IngestionFormat>,
    /// CSV only: turn numeric-looking cells into numbers.
    pub infer_types: bool,
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Failures at or above this severity also trigger `on_alert`.
    pub alert_at_or_above: IngestionSeverity,
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            format: None,
            infer_types: true,
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

impl IngestionOptions {
    pub fn with_observer(mut self, observer: Arc<dyn IngestionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn with_format(mut self, format: IngestionFormat) -> Self {
        self.format = Some(format);
        self
    }
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("format", &self.format)
            .field("infer_types", &self.infer_types)
            .field("has_observer", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

/// Read the file at `path` into a [`RowSequence`].
///
/// An unknown extension fails before anything is read, and is not reported to the observer
/// since no format was chosen. Every other outcome is reported: `on_success` with the row and
/// field counts, or `on_failure` (plus `on_alert` past the threshold) with the error.
///
/// ```no_run
/// use std::sync::Arc;
///
/// use rowkit::ingestion::{ingest_from_path, IngestionOptions, LogObserver};
///
/// # fn main() -> Result<(), rowkit::RowError> {
/// let opts = IngestionOptions::default().with_observer(Arc::new(LogObserver));
/// let rows = ingest_from_path("timesheet.csv", &opts)?;
/// let report = rows.group_by(["project", "user"], ["hours"])?;
/// println!("{} groups", report.len());
/// # Ok(())
/// # }
/// ```
pub fn ingest_from_path(path: impl AsRef<Path>, options: &IngestionOptions) -> RowResult<RowSequence> {
    let path = path.as_ref();
    let format = match options.format {
        Some(format) => format,
        None => IngestionFormat::from_path(path)?,
    };

    let result = match format {
        IngestionFormat::Csv => csv::ingest_csv_from_path(path, options.infer_types),
        IngestionFormat::Json => json::ingest_json_from_path(path),
    };

    if let Some(observer) = &options.observer {
        let ctx = IngestionContext {
            path: path.to_path_buf(),
            format,
        };
        report(observer.as_ref(), &ctx, &result, options.alert_at_or_above);
    }
    result
}

fn report(
    observer: &dyn IngestionObserver,
    ctx: &IngestionContext,
    result: &RowResult<RowSequence>,
    alert_at_or_above: IngestionSeverity,
) {
    match result {
        Ok(rows) => observer.on_success(ctx, stats(rows)),
        Err(error) => {
            let severity = IngestionSeverity::of(error);
            observer.on_failure(ctx, severity, error);
            if severity >= alert_at_or_above {
                observer.on_alert(ctx, severity, error);
            }
        }
    }
}

fn stats(rows: &RowSequence) -> IngestionStats {
    let mut names: Vec<&str> = rows.iter().flat_map(|row| row.keys()).collect();
    names.sort_unstable();
    names.dedup();
    IngestionStats {
        rows: rows.len(),
        fields: names.len(),
    }
}

/// A path and its options, bundled so an ingestion can be stored and re-run.
#[derive(Debug, Clone)]
pub struct IngestionRequest {
    pub path: PathBuf,
    pub options: IngestionOptions,
}

impl IngestionRequest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            options: IngestionOptions::default(),
        }
    }

    pub fn run(&self) -> RowResult<RowSequence> {
        ingest_from_path(&self.path, &self.options)
    }
}
