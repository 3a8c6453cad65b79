//! Grouped iteration: [`gen_filter`] and its [`Groups`] iterator.

use crate::error::RowResult;
use crate::types::{Direction, Fields, GroupOrder, Row, RowSequence, Value};

use super::distinct::distinct;
use super::filter::matches_group;
use super::keys::{NULL, NullOrder};
use super::sort::{sort, sorted_indices};

/// Enumerate the groups of `rows` keyed by `by`.
///
/// Group keys come from [`distinct`], so groups are produced in ascending key order. Nothing
/// else is computed up front: each call to [`Iterator::next`] scans the full input for the
/// members of one group and orders them according to `order`.
///
/// Calling `gen_filter` again repeats the whole computation; the iterator itself cannot be
/// restarted.
pub fn gen_filter<'a>(rows: &'a RowSequence, by: &Fields, order: GroupOrder) -> RowResult<Groups<'a>> {
    let keys = distinct(rows, by)?;
    log::debug!("gen_filter: {} groups over {} rows", keys.len(), rows.len());
    Ok(Groups {
        rows,
        keys: keys.into_iter(),
        order,
    })
}

/// Pull-based iterator of `(group key, members)` pairs returned by [`gen_filter`].
#[derive(Debug)]
pub struct Groups<'a> {
    rows: &'a RowSequence,
    keys: std::vec::IntoIter<Row>,
    order: GroupOrder,
}

impl Iterator for Groups<'_> {
    type Item = RowResult<(Row, RowSequence)>;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        let members = self.rows.filter_rows(|row| matches_group(row, &key));
        log::trace!("gen_filter: group {key:?} has {} rows", members.len());
        Some(order_members(&members, &self.order).map(|members| (key, members)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

fn order_members(members: &RowSequence, order: &GroupOrder) -> RowResult<RowSequence> {
    match order {
        GroupOrder::Natural => Ok(members.clone()),
        GroupOrder::By(fields) => sort(members, fields, false),
        GroupOrder::Directions(directions) => {
            let all_desc = directions.iter().all(|(_, d)| *d == Direction::Desc);
            let all_asc = directions.iter().all(|(_, d)| *d == Direction::Asc);
            if !all_desc && !all_asc {
                log::warn!(
                    "gen_filter: mixed sort directions {directions:?} are not supported, sorting ascending"
                );
            }
            let reverse = !directions.is_empty() && all_desc;

            let fields: Vec<String> = directions.iter().map(|(f, _)| f.clone()).collect();
            let keys: Vec<Vec<&Value>> = members
                .iter()
                .map(|row| fields.iter().map(|f| row.get(f).unwrap_or(&NULL)).collect())
                .collect();
            let idx = sorted_indices(&fields, &keys, reverse, NullOrder::Strict)?;
            Ok(idx.into_iter().map(|i| members[i].clone()).collect())
        }
    }
}
