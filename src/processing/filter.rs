//! Row filtering by field equality.

use crate::error::RowResult;
use crate::types::{Fields, Row, RowSequence};

use super::keys::NULL;
use super::sort::sort;

/// Returns the rows whose value at every `criteria` field equals the criteria value.
///
/// Comparison is by value without string/number coercion. A row missing a criteria field does
/// not match. An empty `criteria` row matches everything. If `order` is non-empty the result is
/// passed through [`sort`] (ascending).
pub fn filter(rows: &RowSequence, criteria: &Row, order: &Fields) -> RowResult<RowSequence> {
    let filtered = rows.filter_rows(|row| matches_criteria(row, criteria));
    log::debug!("filter: {} rows -> {}", rows.len(), filtered.len());
    if order.is_empty() {
        Ok(filtered)
    } else {
        sort(&filtered, order, false)
    }
}

pub(crate) fn matches_criteria(row: &Row, criteria: &Row) -> bool {
    criteria
        .iter()
        .all(|(field, expected)| row.get(field) == Some(expected))
}

/// Group membership: like [`matches_criteria`], but an absent field matches a `Null` key value,
/// so rows lacking a grouping field land in the `Null` group produced by `distinct`.
pub(crate) fn matches_group(row: &Row, group: &Row) -> bool {
    group
        .iter()
        .all(|(field, expected)| row.get(field).unwrap_or(&NULL) == expected)
}
