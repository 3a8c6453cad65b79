//! Deduplication: [`unique`] over whole rows and [`distinct`] over a field projection.

use std::collections::HashSet;

use crate::error::RowResult;
use crate::types::{Fields, RowSequence, Value};

use super::keys::{self, NULL, NullOrder, ValueKey};
use super::sort::sorted_indices;

/// Returns one row per distinct set of `(field, value)` pairs, in first-occurrence order.
///
/// Field order inside a row does not matter. A row holding a nested map fails with
/// [`crate::RowError::Unhashable`].
pub fn unique(rows: &RowSequence) -> RowResult<RowSequence> {
    let mut seen = HashSet::with_capacity(rows.len());
    let mut out = Vec::new();
    for row in rows {
        if seen.insert(keys::row_key(row, "unique")?) {
            out.push(row.clone());
        }
    }
    log::debug!("unique: {} rows -> {}", rows.len(), out.len());
    Ok(RowSequence::new(out))
}

/// Returns the distinct projections of the rows onto `by`, sorted ascending by those fields.
///
/// - An empty `by` behaves like [`unique`].
/// - Output rows contain exactly the `by` fields; a field absent from a row projects as `Null`.
/// - `Null` sorts before every other value.
pub fn distinct(rows: &RowSequence, by: &Fields) -> RowResult<RowSequence> {
    if by.is_empty() {
        return unique(rows);
    }

    let mut seen = HashSet::new();
    let mut projected = Vec::new();
    for row in rows {
        let key = by
            .iter()
            .map(|field| ValueKey::of(field, row.get(field).unwrap_or(&NULL), "distinct"))
            .collect::<RowResult<Vec<_>>>()?;
        if seen.insert(key) {
            projected.push(row.project(by));
        }
    }

    let order = {
        let sort_keys: Vec<Vec<&Value>> = projected
            .iter()
            .map(|row| by.iter().map(|field| row.get(field).unwrap_or(&NULL)).collect())
            .collect();
        sorted_indices(by.as_slice(), &sort_keys, false, NullOrder::First)?
    };

    let mut slots: Vec<_> = projected.into_iter().map(Some).collect();
    let out: RowSequence = order.into_iter().filter_map(|i| slots[i].take()).collect();
    log::debug!("distinct: {} rows -> {} by {:?}", rows.len(), out.len(), by.as_slice());
    Ok(out)
}
