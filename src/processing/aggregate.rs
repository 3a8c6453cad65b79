//! Grouped aggregation with named operators.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};

use crate::error::{RowError, RowResult};
use crate::types::{Fields, Row, RowSequence, Value};

use super::distinct::distinct;
use super::filter::matches_group;
use super::keys;

/// Built-in aggregation operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateOp {
    /// Sum of the field; absent and null count as 0.
    Sum,
    /// Number of rows in the group, whatever the field holds.
    Count,
    /// Arithmetic mean over all rows of the group (absent/null as 0); `0` for an empty group.
    Avg,
    /// Smallest value (absent/null as 0); `0` for an empty group.
    Min,
    /// Largest value (absent/null as 0); `0` for an empty group.
    Max,
}

impl AggregateOp {
    pub fn as_str(self) -> &'static str {
        match self {
            AggregateOp::Sum => "sum",
            AggregateOp::Count => "count",
            AggregateOp::Avg => "avg",
            AggregateOp::Min => "min",
            AggregateOp::Max => "max",
        }
    }

    /// Name of the output field for `field`, e.g. `hours_sum`.
    pub fn output_field(self, field: &str) -> String {
        format!("{field}_{}", self.as_str())
    }
}

impl fmt::Display for AggregateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregateOp {
    type Err = RowError;

    fn from_str(s: &str) -> RowResult<Self> {
        match s {
            "sum" => Ok(AggregateOp::Sum),
            "count" => Ok(AggregateOp::Count),
            "avg" => Ok(AggregateOp::Avg),
            "min" => Ok(AggregateOp::Min),
            "max" => Ok(AggregateOp::Max),
            other => Err(RowError::UnknownAggregation {
                op: other.to_string(),
            }),
        }
    }
}

/// Ordered `field -> operator names` specification for [`aggregate`].
///
/// Operator names are kept as written and resolved when [`aggregate`] runs, so an unknown name
/// surfaces as [`RowError::UnknownAggregation`].
///
/// Can be decoded from JSON such as `{"hours": ["sum", "avg"], "project": "count"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregations {
    specs: Vec<(String, Vec<String>)>,
}

impl Aggregations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request `ops` for `field`. Adding the same field again replaces its operators.
    pub fn agg<I, S>(mut self, field: impl Into<String>, ops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let field = field.into();
        let ops: Vec<String> = ops.into_iter().map(Into::into).collect();
        match self.specs.iter_mut().find(|(name, _)| *name == field) {
            Some((_, slot)) => *slot = ops,
            None => self.specs.push((field, ops)),
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Iterate `(field, operator names)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.specs.iter().map(|(f, ops)| (f.as_str(), ops.as_slice()))
    }

    fn resolve(&self) -> RowResult<Vec<(&str, AggregateOp)>> {
        let mut plan = Vec::new();
        for (field, ops) in self.iter() {
            for op in ops {
                plan.push((field, op.parse::<AggregateOp>()?));
            }
        }
        Ok(plan)
    }
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

struct AggregationsVisitor;

impl<'de> Visitor<'de> for AggregationsVisitor {
    type Value = Aggregations;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of field name to an operator name or a list of operator names")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Aggregations, A::Error> {
        let mut aggs = Aggregations::new();
        while let Some((field, ops)) = map.next_entry::<String, OneOrMany>()? {
            aggs = match ops {
                OneOrMany::One(op) => aggs.agg(field, [op]),
                OneOrMany::Many(ops) => aggs.agg(field, ops),
            };
        }
        Ok(aggs)
    }
}

impl<'de> Deserialize<'de> for Aggregations {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(AggregationsVisitor)
    }
}

#[derive(Debug, Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn as_f64(self) -> f64 {
        match self {
            Number::Int(v) => v as f64,
            Number::Float(v) => v,
        }
    }

    fn add(self, other: Number) -> Number {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a
                .checked_add(b)
                .map(Number::Int)
                .unwrap_or(Number::Float(a as f64 + b as f64)),
            (a, b) => Number::Float(a.as_f64() + b.as_f64()),
        }
    }

    fn into_value(self) -> Value {
        match self {
            Number::Int(v) => Value::Int64(v),
            Number::Float(v) => Value::Float64(v),
        }
    }

    fn cmp(self, other: Number) -> Ordering {
        keys::total_cmp(&self.into_value(), &other.into_value())
    }
}

/// Numeric input of `field`: absent and null become 0, anything non-numeric is an error.
fn numeric_input(row: &Row, field: &str, op: AggregateOp) -> RowResult<Number> {
    match row.get(field) {
        None | Some(Value::Null) => Ok(Number::Int(0)),
        Some(Value::Int64(v)) => Ok(Number::Int(*v)),
        Some(Value::Float64(v)) => Ok(Number::Float(*v)),
        Some(other) => Err(RowError::NonNumeric {
            field: field.to_string(),
            op: op.to_string(),
            found: other.type_name(),
        }),
    }
}

fn sum(members: &[&Row], field: &str, op: AggregateOp) -> RowResult<Number> {
    members.iter().try_fold(Number::Int(0), |acc, row| {
        Ok(acc.add(numeric_input(row, field, op)?))
    })
}

/// Sum of `field` over `members` with the same coercions as [`AggregateOp::Sum`].
pub(crate) fn sum_field(members: &[&Row], field: &str) -> RowResult<Value> {
    sum(members, field, AggregateOp::Sum).map(Number::into_value)
}

fn apply(members: &[&Row], field: &str, op: AggregateOp) -> RowResult<Value> {
    match op {
        AggregateOp::Count => Ok(Value::Int64(members.len() as i64)),
        AggregateOp::Sum => sum_field(members, field),
        AggregateOp::Avg => {
            if members.is_empty() {
                return Ok(Value::Int64(0));
            }
            let total = sum(members, field, op)?;
            Ok(Value::Float64(total.as_f64() / members.len() as f64))
        }
        AggregateOp::Min | AggregateOp::Max => {
            let mut acc: Option<Number> = None;
            for row in members {
                let n = numeric_input(row, field, op)?;
                acc = Some(match acc {
                    None => n,
                    Some(a) if op == AggregateOp::Min && a.cmp(n) == Ordering::Less => a,
                    Some(a) if op == AggregateOp::Max && a.cmp(n) == Ordering::Greater => a,
                    Some(_) => n,
                });
            }
            Ok(acc.unwrap_or(Number::Int(0)).into_value())
        }
    }
}

fn aggregate_group(mut out: Row, members: &[&Row], plan: &[(&str, AggregateOp)]) -> RowResult<Row> {
    for (field, op) in plan {
        out.insert(op.output_field(field), apply(members, field, *op)?);
    }
    Ok(out)
}

/// Aggregate `rows`, optionally grouped by `group_columns`.
///
/// Each `(field, op)` pair of `aggregations` produces an output field `<field>_<op>`.
///
/// - Empty `group_columns`: the whole input is one group and the result is a single row holding
///   only the aggregated fields (even for empty input).
/// - Otherwise one row per distinct group key (ascending key order), holding the key fields and
///   the aggregated fields. Empty input gives an empty result.
/// - Absent and null inputs count as 0 for `sum`/`avg`/`min`/`max`; any other non-numeric value
///   is a [`RowError::NonNumeric`] error.
/// - Operator names are validated before any row is read.
pub fn aggregate(
    rows: &RowSequence,
    group_columns: &Fields,
    aggregations: &Aggregations,
) -> RowResult<RowSequence> {
    let plan = aggregations.resolve()?;

    if group_columns.is_empty() {
        let members: Vec<&Row> = rows.iter().collect();
        let out = aggregate_group(Row::new(), &members, &plan)?;
        log::debug!("aggregate: {} rows into a single group", rows.len());
        return Ok(RowSequence::new(vec![out]));
    }

    let groups = distinct(rows, group_columns)?;
    let mut out = Vec::with_capacity(groups.len());
    for group in groups {
        let members: Vec<&Row> = rows.iter().filter(|row| matches_group(row, &group)).collect();
        log::trace!("aggregate: group {group:?} has {} rows", members.len());
        out.push(aggregate_group(group, &members, &plan)?);
    }
    log::debug!(
        "aggregate: {} rows into {} groups by {:?}",
        rows.len(),
        out.len(),
        group_columns.as_slice()
    );
    Ok(RowSequence::new(out))
}
