//! Hash joins on a single key field.
//!
//! Both joins index the right-hand rows by `key` in one pass. When several right rows share a
//! key value the last one wins. A right row without `key` aborts the join before any output is
//! produced.

use std::collections::HashMap;

use crate::error::{RowError, RowResult};
use crate::types::{Row, RowSequence};

use super::keys::ValueKey;

fn build_index<'r>(
    right: &'r RowSequence,
    key: &str,
    operation: &'static str,
) -> RowResult<HashMap<ValueKey, &'r Row>> {
    let mut index = HashMap::with_capacity(right.len());
    for row in right {
        let value = row.get(key).ok_or_else(|| RowError::MissingField {
            field: key.to_string(),
            operation,
        })?;
        index.insert(ValueKey::of(key, value, operation)?, row);
    }
    Ok(index)
}

fn lookup<'r>(
    index: &HashMap<ValueKey, &'r Row>,
    row: &Row,
    key: &str,
    operation: &'static str,
) -> RowResult<Option<&'r Row>> {
    match row.get(key) {
        Some(value) => Ok(index.get(&ValueKey::of(key, value, operation)?).copied()),
        None => Ok(None),
    }
}

/// Inner join: one merged row per left row with a matching right row.
///
/// Right values overwrite left values on field collisions. Unmatched left rows, including
/// left rows without `key`, are dropped.
pub fn join(left: &RowSequence, right: &RowSequence, key: &str) -> RowResult<RowSequence> {
    let index = build_index(right, key, "join")?;

    let mut out = Vec::new();
    for row in left {
        if let Some(matched) = lookup(&index, row, key, "join")? {
            let mut merged = row.clone();
            for (field, value) in matched.iter() {
                merged.insert(field, value.clone());
            }
            out.push(merged);
        }
    }
    log::debug!(
        "join on '{key}': {} left x {} right -> {}",
        left.len(),
        right.len(),
        out.len()
    );
    Ok(RowSequence::new(out))
}

/// Left join: every left row, extended with the matching right row's fields it does not have.
///
/// Left values are never overwritten. Unmatched left rows pass through unchanged.
pub fn left_join(left: &RowSequence, right: &RowSequence, key: &str) -> RowResult<RowSequence> {
    let index = build_index(right, key, "left_join")?;

    let mut out = Vec::with_capacity(left.len());
    for row in left {
        let mut merged = row.clone();
        if let Some(matched) = lookup(&index, row, key, "left_join")? {
            for (field, value) in matched.iter() {
                if !merged.contains_key(field) {
                    merged.insert(field, value.clone());
                }
            }
        }
        out.push(merged);
    }
    log::debug!(
        "left_join on '{key}': {} left x {} right",
        left.len(),
        right.len()
    );
    Ok(RowSequence::new(out))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{join, left_join};
    use crate::error::ErrorKind;
    use crate::row;
    use crate::types::RowSequence;

    fn users() -> RowSequence {
        RowSequence::new(vec![
            row! { "id" => 1, "name" => "Alice" },
            row! { "id" => 2, "name" => "Bob" },
        ])
    }

    fn roles() -> RowSequence {
        RowSequence::new(vec![
            row! { "id" => 1, "role" => "Admin" },
            row! { "id" => 3, "role" => "Guest" },
        ])
    }

    #[test]
    fn inner_join_keeps_only_matches() {
        let out = join(&users(), &roles(), "id").unwrap();
        assert_eq!(out, vec![row! { "id" => 1, "name" => "Alice", "role" => "Admin" }]);
    }

    #[test]
    fn inner_join_right_wins_on_collision() {
        let left = RowSequence::new(vec![row! { "id" => 1, "role" => "Boss" }]);
        let right = RowSequence::new(vec![row! { "id" => 1, "role" => "Admin" }]);
        let out = join(&left, &right, "id").unwrap();
        assert_eq!(out, vec![row! { "id" => 1, "role" => "Admin" }]);
    }

    #[test]
    fn left_join_keeps_unmatched_rows() {
        let out = left_join(&users(), &roles(), "id").unwrap();
        assert_eq!(
            out,
            vec![
                row! { "id" => 1, "name" => "Alice", "role" => "Admin" },
                row! { "id" => 2, "name" => "Bob" },
            ]
        );
    }

    #[test]
    fn left_join_left_wins_on_collision() {
        let left = RowSequence::new(vec![row! { "id" => 1, "role" => "Boss" }]);
        let right = RowSequence::new(vec![row! { "id" => 1, "role" => "Admin", "team" => "core" }]);
        let out = left_join(&left, &right, "id").unwrap();
        assert_eq!(out, vec![row! { "id" => 1, "role" => "Boss", "team" => "core" }]);
    }

    #[test]
    fn last_right_row_wins_for_duplicate_keys() {
        let right = RowSequence::new(vec![
            row! { "id" => 1, "role" => "first" },
            row! { "id" => 1, "role" => "last" },
        ]);
        let out = join(&users(), &right, "id").unwrap();
        assert_eq!(out, vec![row! { "id" => 1, "name" => "Alice", "role" => "last" }]);
    }

    #[test]
    fn right_row_without_key_fails_fast() {
        let right = RowSequence::new(vec![row! { "id" => 1, "role" => "Admin" }, row! { "role" => "x" }]);
        for err in [
            join(&users(), &right, "id").unwrap_err(),
            left_join(&users(), &right, "id").unwrap_err(),
        ] {
            assert_eq!(err.kind(), ErrorKind::Lookup);
            assert!(err.to_string().contains("missing field 'id'"));
        }
    }

    #[test]
    fn left_rows_without_key_never_match() {
        let left = RowSequence::new(vec![row! { "name" => "nobody" }]);
        assert!(join(&left, &roles(), "id").unwrap().is_empty());
        assert_eq!(
            left_join(&left, &roles(), "id").unwrap(),
            vec![row! { "name" => "nobody" }]
        );
    }

    #[test]
    fn integer_and_float_keys_match() {
        let left = RowSequence::new(vec![row! { "id" => 1.0, "name" => "Alice" }]);
        let out = join(&left, &roles(), "id").unwrap();
        assert_eq!(out.len(), 1);
    }
}
