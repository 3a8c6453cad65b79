//! Hash keys and orderings over [`Value`]s.
//!
//! [`ValueKey`] is the hashable image of a value. Numbers are normalized so that `2` and `2.0`
//! hash alike, matching [`Value`]'s equality. Nested maps have no key.
//!
//! Orderings are total within a type class (null, bool, number, string). Callers run
//! [`ensure_comparable`] first so that sorting never has to compare across classes.

use std::cmp::Ordering;

use crate::error::{RowError, RowResult};
use crate::types::{Row, Value};

pub(crate) static NULL: Value = Value::Null;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum ValueKey {
    Null,
    Bool(bool),
    Int(i64),
    Float(u64),
    Utf8(String),
}

impl ValueKey {
    pub(crate) fn of(field: &str, value: &Value, operation: &'static str) -> RowResult<Self> {
        Ok(match value {
            Value::Null => ValueKey::Null,
            Value::Bool(v) => ValueKey::Bool(*v),
            Value::Int64(v) => ValueKey::Int(*v),
            Value::Float64(v) => {
                let t = v.trunc();
                if crate::types::int_eq_float(t as i64, *v) {
                    ValueKey::Int(t as i64)
                } else {
                    ValueKey::Float(v.to_bits())
                }
            }
            Value::Utf8(s) => ValueKey::Utf8(s.clone()),
            Value::Map(_) => {
                return Err(RowError::Unhashable {
                    field: field.to_string(),
                    operation,
                });
            }
        })
    }
}

/// Order-independent key of a full row: its pairs sorted by field name.
pub(crate) fn row_key(row: &Row, operation: &'static str) -> RowResult<Vec<(String, ValueKey)>> {
    let mut key = row
        .iter()
        .map(|(name, value)| Ok((name.to_string(), ValueKey::of(name, value, operation)?)))
        .collect::<RowResult<Vec<_>>>()?;
    key.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(key)
}

/// How `Null` takes part in an ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NullOrder {
    /// `Null` only compares with `Null`.
    Strict,
    /// `Null` sorts before every other value.
    First,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Class {
    Null,
    Bool,
    Number,
    Utf8,
    Map,
}

fn class_of(value: &Value) -> Class {
    match value {
        Value::Null => Class::Null,
        Value::Bool(_) => Class::Bool,
        Value::Int64(_) | Value::Float64(_) => Class::Number,
        Value::Utf8(_) => Class::Utf8,
        Value::Map(_) => Class::Map,
    }
}

/// Fails unless every column of `keys` can be ordered.
///
/// A column is orderable when all its values share one type class (ignoring nulls under
/// [`NullOrder::First`]) and, if there is more than one row, that class is not `map`.
pub(crate) fn ensure_comparable(
    fields: &[String],
    keys: &[Vec<&Value>],
    nulls: NullOrder,
) -> RowResult<()> {
    if keys.len() < 2 {
        return Ok(());
    }
    for (col, field) in fields.iter().enumerate() {
        let mut seen: Option<&Value> = None;
        for tuple in keys {
            let value = tuple[col];
            if nulls == NullOrder::First && value.is_null() {
                continue;
            }
            match seen {
                None => seen = Some(value),
                Some(first) if class_of(first) != class_of(value) || class_of(value) == Class::Map => {
                    return Err(RowError::Incomparable {
                        field: field.clone(),
                        left: first.type_name(),
                        right: value.type_name(),
                    });
                }
                Some(_) => {}
            }
        }
    }
    Ok(())
}

/// Exact comparison of an integer with a float; NaN sorts by its sign like `f64::total_cmp`.
pub(crate) fn cmp_int_float(i: i64, f: f64) -> Ordering {
    if f.is_nan() {
        return if f.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if f >= 9_223_372_036_854_775_808.0 {
        return Ordering::Less;
    }
    if f < -9_223_372_036_854_775_808.0 {
        return Ordering::Greater;
    }
    let t = f.trunc();
    match i.cmp(&(t as i64)) {
        Ordering::Equal if f > t => Ordering::Less,
        Ordering::Equal if f < t => Ordering::Greater,
        other => other,
    }
}

fn cmp_floats(a: f64, b: f64) -> Ordering {
    if a == b { Ordering::Equal } else { a.total_cmp(&b) }
}

/// Total order over values: by class first, then by value within the class.
pub(crate) fn total_cmp(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Int64(x), Value::Int64(y)) => x.cmp(y),
        (Value::Float64(x), Value::Float64(y)) => cmp_floats(*x, *y),
        (Value::Int64(x), Value::Float64(y)) => cmp_int_float(*x, *y),
        (Value::Float64(x), Value::Int64(y)) => cmp_int_float(*y, *x).reverse(),
        (Value::Utf8(x), Value::Utf8(y)) => x.cmp(y),
        _ => class_of(a).cmp(&class_of(b)),
    }
}

/// Lexicographic comparison of two key tuples.
pub(crate) fn cmp_tuples(a: &[&Value], b: &[&Value]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| total_cmp(x, y))
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::{NullOrder, ValueKey, cmp_int_float, ensure_comparable, row_key, total_cmp};
    use crate::error::ErrorKind;
    use crate::row;
    use crate::types::Value;

    #[test]
    fn integral_floats_share_the_integer_key() {
        let a = ValueKey::of("x", &Value::Int64(3), "test").unwrap();
        let b = ValueKey::of("x", &Value::Float64(3.0), "test").unwrap();
        let c = ValueKey::of("x", &Value::Float64(3.5), "test").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn nested_maps_have_no_key() {
        let err = row_key(&row! { "meta" => row! { "a" => 1 } }, "unique").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert!(err.to_string().contains("'meta'"));
    }

    #[test]
    fn row_key_ignores_field_order() {
        let a = row_key(&row! { "id" => 1, "name" => "A" }, "unique").unwrap();
        let b = row_key(&row! { "name" => "A", "id" => 1 }, "unique").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn int_float_comparison_is_exact() {
        assert_eq!(cmp_int_float(3, 3.0), Ordering::Equal);
        assert_eq!(cmp_int_float(3, 3.5), Ordering::Less);
        assert_eq!(cmp_int_float(-3, -3.5), Ordering::Greater);
        assert_eq!(cmp_int_float(i64::MAX, 1e19), Ordering::Less);
        assert_eq!(
            total_cmp(&Value::Float64(2.5), &Value::Int64(2)),
            Ordering::Greater
        );
    }

    #[test]
    fn mixed_classes_are_rejected_unless_null_first() {
        let fields = vec!["k".to_string()];
        let one = Value::Int64(1);
        let null = Value::Null;
        let text = Value::from("a");

        let keys = vec![vec![&one], vec![&null]];
        assert!(ensure_comparable(&fields, &keys, NullOrder::Strict).is_err());
        assert!(ensure_comparable(&fields, &keys, NullOrder::First).is_ok());

        let keys = vec![vec![&one], vec![&text]];
        let err = ensure_comparable(&fields, &keys, NullOrder::First).unwrap_err();
        assert_eq!(
            err.to_string(),
            "type error: cannot order int64 against utf8 in field 'k'"
        );
    }
}
