//! Re-serializing row sequences.
//!
//! JSON output is an array of objects with each row's field order preserved. CSV output uses the
//! union of all field names (first-seen order) as the header.

use std::io::Write;

use crate::error::RowResult;
use crate::types::{RowSequence, Value};

/// Serialize rows as a compact JSON array of objects.
pub fn to_json_string(rows: &RowSequence) -> RowResult<String> {
    Ok(serde_json::to_string(rows)?)
}

/// Serialize rows as a pretty-printed JSON array of objects.
pub fn to_json_string_pretty(rows: &RowSequence) -> RowResult<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

/// Write rows as CSV.
///
/// Absent fields and nulls become empty cells; nested maps are written as compact JSON.
/// An empty sequence writes nothing.
pub fn write_csv<W: Write>(rows: &RowSequence, writer: W) -> RowResult<()> {
    let mut headers: Vec<&str> = Vec::new();
    for row in rows {
        for name in row.keys() {
            if !headers.contains(&name) {
                headers.push(name);
            }
        }
    }

    let mut wtr = csv::Writer::from_writer(writer);
    if !headers.is_empty() {
        wtr.write_record(&headers)?;
        for row in rows {
            let record = headers
                .iter()
                .map(|name| match row.get(name) {
                    None | Some(Value::Null) => String::new(),
                    Some(value) => value.to_string(),
                })
                .collect::<Vec<_>>();
            wtr.write_record(&record)?;
        }
    }
    wtr.flush()?;
    Ok(())
}
