//! Outcome reporting for [`super::ingest_from_path`].

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::RowError;

use super::unified::IngestionFormat;

/// How bad a failed ingestion is. Ordered, so it can be used as an alert threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngestionSeverity {
    /// The file was read but its content could not be turned into rows.
    Error,
    /// The file could not be read at all.
    Critical,
}

impl IngestionSeverity {
    /// Classify an ingestion error: anything that failed at the I/O layer is critical.
    pub fn of(error: &RowError) -> Self {
        let io = match error {
            RowError::Io(_) => true,
            RowError::Csv(e) => matches!(e.kind(), csv::ErrorKind::Io(_)),
            RowError::Json(e) => e.is_io(),
            _ => false,
        };
        if io {
            IngestionSeverity::Critical
        } else {
            IngestionSeverity::Error
        }
    }
}

/// Which file was ingested and how it was decoded.
#[derive(Debug, Clone)]
pub struct IngestionContext {
    pub path: PathBuf,
    pub format: IngestionFormat,
}

/// Shape of a successfully ingested sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionStats {
    /// Number of rows.
    pub rows: usize,
    /// Number of distinct field names across all rows.
    pub fields: usize,
}

/// Receives the outcome of every ingestion that has it configured.
///
/// All methods default to doing nothing, except `on_alert` which forwards to `on_failure`.
pub trait IngestionObserver: Send + Sync {
    fn on_success(&self, _ctx: &IngestionContext, _stats: IngestionStats) {}

    fn on_failure(&self, _ctx: &IngestionContext, _severity: IngestionSeverity, _error: &RowError) {}

    /// Called in addition to `on_failure` once the severity reaches
    /// [`super::IngestionOptions::alert_at_or_above`].
    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &RowError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Forwards every event to each wrapped observer in turn.
#[derive(Default, Clone)]
pub struct CompositeObserver {
    inner: Vec<Arc<dyn IngestionObserver>>,
}

impl CompositeObserver {
    pub fn new(inner: Vec<Arc<dyn IngestionObserver>>) -> Self {
        Self { inner }
    }

    /// Add another observer to the end of the list.
    pub fn with(mut self, observer: Arc<dyn IngestionObserver>) -> Self {
        self.inner.push(observer);
        self
    }

    fn each(&self, f: impl Fn(&dyn IngestionObserver)) {
        self.inner.iter().for_each(|o| f(o.as_ref()));
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompositeObserver({} observers)", self.inner.len())
    }
}

impl IngestionObserver for CompositeObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        self.each(|o| o.on_success(ctx, stats));
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &RowError) {
        self.each(|o| o.on_failure(ctx, severity, error));
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &RowError) {
        self.each(|o| o.on_alert(ctx, severity, error));
    }
}

/// Writes ingestion events to the [`log`] facade.
///
/// Successes go to `info`, plain failures to `warn`, critical failures and alerts to `error`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl IngestionObserver for LogObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        log::info!(
            "loaded {} rows ({} fields) from {} as {:?}",
            stats.rows,
            stats.fields,
            ctx.path.display(),
            ctx.format
        );
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &RowError) {
        let level = match severity {
            IngestionSeverity::Critical => log::Level::Error,
            IngestionSeverity::Error => log::Level::Warn,
        };
        log::log!(level, "could not load {} as {:?}: {error}", ctx.path.display(), ctx.format);
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &RowError) {
        log::error!("ALERT {severity:?}: {} as {:?}: {error}", ctx.path.display(), ctx.format);
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::IngestionSeverity;
    use crate::error::RowError;

    #[test]
    fn io_failures_are_critical() {
        let missing = RowError::Io(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(IngestionSeverity::of(&missing), IngestionSeverity::Critical);

        let shape = RowError::SchemaMismatch {
            message: "row 1 is not a json object".to_string(),
        };
        assert_eq!(IngestionSeverity::of(&shape), IngestionSeverity::Error);
        assert!(IngestionSeverity::Critical > IngestionSeverity::Error);
    }
}
