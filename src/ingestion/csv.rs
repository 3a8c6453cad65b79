//! CSV ingestion implementation.

use std::path::Path;

use crate::error::{RowError, RowResult};
use crate::types::{Row, RowSequence, Value};

/// Ingest a CSV file into a [`RowSequence`].
///
/// Rules:
///
/// - CSV must have headers; header names become field names and must be unique.
/// - Empty (or whitespace-only) cells become [`Value::Null`].
/// - With `infer_types`, cells that parse as an integer become [`Value::Int64`], finite decimals
///   become [`Value::Float64`] and everything else stays [`Value::Utf8`]. Without it every
///   non-empty cell is [`Value::Utf8`].
pub fn ingest_csv_from_path(path: impl AsRef<Path>, infer_types: bool) -> RowResult<RowSequence> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    ingest_csv_from_reader(&mut rdr, infer_types)
}

/// Ingest CSV data from an existing CSV reader.
pub fn ingest_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    infer_types: bool,
) -> RowResult<RowSequence> {
    let headers = rdr.headers()?.clone();

    for (i, name) in headers.iter().enumerate() {
        if headers.iter().take(i).any(|h| h == name) {
            return Err(RowError::SchemaMismatch {
                message: format!(
                    "duplicate column '{name}'. headers={:?}",
                    headers.iter().collect::<Vec<_>>()
                ),
            });
        }
    }

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let mut row = Row::with_capacity(headers.len());
        for (name, raw) in headers.iter().zip(record.iter()) {
            row.insert(name, parse_cell(raw, infer_types));
        }
        rows.push(row);
    }

    Ok(RowSequence::new(rows))
}

fn parse_cell(raw: &str, infer_types: bool) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if !infer_types {
        return Value::Utf8(trimmed.to_owned());
    }

    if let Ok(v) = trimmed.parse::<i64>() {
        return Value::Int64(v);
    }
    match trimmed.parse::<f64>() {
        // "inf"/"nan" parse as floats but are almost always text in a report.
        Ok(v) if v.is_finite() => Value::Float64(v),
        _ => Value::Utf8(trimmed.to_owned()),
    }
}
