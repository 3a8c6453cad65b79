//! Grouping with per-field totals.

use crate::error::RowResult;
use crate::types::{Fields, Row, RowSequence};

use super::aggregate::sum_field;
use super::distinct::distinct;
use super::filter::matches_group;

fn totals(mut out: Row, members: &[&Row], total_columns: &Fields) -> RowResult<Row> {
    for field in total_columns.iter() {
        out.insert(field, sum_field(members, field)?);
    }
    Ok(out)
}

/// Group `rows` by `group_columns` and sum `total_columns` within each group.
///
/// - Neither given: empty result.
/// - Only `total_columns`: a single row with the sum of each field over all rows.
/// - `group_columns` given: one row per distinct key (ascending key order) holding the key fields
///   and, when `total_columns` is non-empty, one sum per total field under the field's own name.
///
/// Absent and null values count as 0; other non-numeric values fail.
pub fn group_by(rows: &RowSequence, group_columns: &Fields, total_columns: &Fields) -> RowResult<RowSequence> {
    if group_columns.is_empty() {
        if total_columns.is_empty() {
            return Ok(RowSequence::default());
        }
        let members: Vec<&Row> = rows.iter().collect();
        return Ok(RowSequence::new(vec![totals(Row::new(), &members, total_columns)?]));
    }

    let groups = distinct(rows, group_columns)?;
    let mut out = Vec::with_capacity(groups.len());
    for group in groups {
        let members: Vec<&Row> = rows.iter().filter(|row| matches_group(row, &group)).collect();
        out.push(totals(group, &members, total_columns)?);
    }
    log::debug!(
        "group_by: {} rows into {} groups by {:?}",
        rows.len(),
        out.len(),
        group_columns.as_slice()
    );
    Ok(RowSequence::new(out))
}
