use thiserror::Error;

/// Convenience result type for row operations and ingestion.
pub type RowResult<T> = Result<T, RowError>;

/// Broad classification of a [`RowError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required field was absent and no default applies.
    Lookup,
    /// A value had the wrong type for the requested operation.
    Type,
    /// An argument value was not recognized (operator name, sort direction).
    Value,
    /// Decoding rows from an external source failed.
    Ingestion,
}

/// Error type returned by row operations and ingestion functions.
///
/// This is a single error enum shared by every operation in the crate. Use [`RowError::kind`] to
/// branch on the lookup/type/value taxonomy without matching every variant.
#[derive(Debug, Error)]
pub enum RowError {
    /// A row lacks a field the operation cannot default (sort keys, join keys on the right side).
    #[error("lookup error: row is missing field '{field}' required by {operation}")]
    MissingField {
        field: String,
        operation: &'static str,
    },

    /// A nested mapping reached an operation that needs to hash the value.
    #[error("type error: field '{field}' holds a nested mapping, which {operation} cannot hash")]
    Unhashable {
        field: String,
        operation: &'static str,
    },

    /// Two values of incompatible types had to be ordered.
    #[error("type error: cannot order {left} against {right} in field '{field}'")]
    Incomparable {
        field: String,
        left: &'static str,
        right: &'static str,
    },

    /// A numeric aggregation met a non-numeric value.
    #[error("type error: cannot apply '{op}' to {found} value in field '{field}'")]
    NonNumeric {
        field: String,
        op: String,
        found: &'static str,
    },

    /// The aggregation operator name is not one of `sum`, `count`, `avg`, `min`, `max`.
    #[error("unknown aggregation type: {op}")]
    UnknownAggregation { op: String },

    /// The sort direction is neither `asc` nor `desc`.
    #[error("unknown sort direction: {direction}")]
    UnknownDirection { direction: String },

    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV decoding or encoding error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON decoding or encoding error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input does not have the expected shape (not an object, unknown format, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },
}

impl RowError {
    /// Returns the taxonomy bucket of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RowError::MissingField { .. } => ErrorKind::Lookup,
            RowError::Unhashable { .. }
            | RowError::Incomparable { .. }
            | RowError::NonNumeric { .. } => ErrorKind::Type,
            RowError::UnknownAggregation { .. } | RowError::UnknownDirection { .. } => {
                ErrorKind::Value
            }
            RowError::Io(_)
            | RowError::Csv(_)
            | RowError::Json(_)
            | RowError::SchemaMismatch { .. } => ErrorKind::Ingestion,
        }
    }
}
