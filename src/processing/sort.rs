//! Multi-key sorting for [`crate::types::RowSequence`].

use crate::error::{RowError, RowResult};
use crate::types::{Fields, RowSequence, Value};

use super::keys::{self, NullOrder};

/// Returns the rows sorted by the tuple of `by` fields.
///
/// - An empty `by` returns the rows unchanged.
/// - The sort is stable; `reverse` flips the whole tuple while equal rows keep input order.
/// - Every row must carry every `by` field ([`RowError::MissingField`] otherwise).
/// - Values in one field must be mutually orderable ([`RowError::Incomparable`] otherwise).
pub fn sort(rows: &RowSequence, by: &Fields, reverse: bool) -> RowResult<RowSequence> {
    if by.is_empty() {
        return Ok(rows.clone());
    }

    let keys = rows
        .iter()
        .map(|row| {
            by.iter()
                .map(|field| {
                    row.get(field).ok_or_else(|| RowError::MissingField {
                        field: field.to_string(),
                        operation: "sort",
                    })
                })
                .collect::<RowResult<Vec<&Value>>>()
        })
        .collect::<RowResult<Vec<_>>>()?;

    let order = sorted_indices(by.as_slice(), &keys, reverse, NullOrder::Strict)?;
    log::debug!("sort: {} rows by {:?} reverse={reverse}", rows.len(), by.as_slice());
    Ok(order.into_iter().map(|i| rows[i].clone()).collect())
}

/// Stable ordering of `keys` as row indexes.
pub(crate) fn sorted_indices(
    fields: &[String],
    keys: &[Vec<&Value>],
    reverse: bool,
    nulls: NullOrder,
) -> RowResult<Vec<usize>> {
    keys::ensure_comparable(fields, keys, nulls)?;

    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by(|&a, &b| {
        let ord = keys::cmp_tuples(&keys[a], &keys[b]);
        if reverse { ord.reverse() } else { ord }
    });
    Ok(order)
}
