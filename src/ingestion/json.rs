//! JSON ingestion implementation.
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"a":1}, {"a":2}]`
//! - A single JSON object: `{"a":1}`
//! - Newline-delimited JSON (NDJSON): `{"a":1}\n{"a":2}\n`
//!
//! Object key order is preserved. Nested objects become [`Value::Map`]; arrays are rejected.

use std::fs;
use std::path::Path;

use crate::error::{RowError, RowResult};
use crate::types::{RowSequence, Value};

/// Ingest a JSON file into a [`RowSequence`].
pub fn ingest_json_from_path(path: impl AsRef<Path>) -> RowResult<RowSequence> {
    let text = fs::read_to_string(path)?;
    ingest_json_from_str(&text)
}

/// Ingest JSON from an in-memory string into a [`RowSequence`].
pub fn ingest_json_from_str(input: &str) -> RowResult<RowSequence> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(RowError::SchemaMismatch {
            message: "json input is empty".to_string(),
        });
    }

    if trimmed.starts_with('[') {
        let values: Vec<Value> = serde_json::from_str(trimmed)?;
        return rows_from_values(values);
    }

    // A single document first, NDJSON otherwise.
    if let Ok(v) = serde_json::from_str::<Value>(trimmed) {
        return rows_from_values(vec![v]);
    }

    let mut values = Vec::new();
    for (i, line) in trimmed.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let v = serde_json::from_str::<Value>(line).map_err(|e| RowError::SchemaMismatch {
            message: format!("invalid ndjson at line {}: {}", i + 1, e),
        })?;
        values.push(v);
    }
    rows_from_values(values)
}

fn rows_from_values(values: Vec<Value>) -> RowResult<RowSequence> {
    values
        .into_iter()
        .enumerate()
        .map(|(idx0, v)| match v {
            Value::Map(row) => Ok(row),
            other => Err(RowError::SchemaMismatch {
                message: format!("row {} is not a json object (found {})", idx0 + 1, other.type_name()),
            }),
        })
        .collect::<RowResult<Vec<_>>>()
        .map(RowSequence::new)
}
