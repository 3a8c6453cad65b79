//! In-memory row transformations.
//!
//! Every function reads a [`crate::types::RowSequence`] and returns a new one; inputs are never
//! mutated. The same operations are available as methods on `RowSequence` for chaining.
//!
//! Currently implemented:
//!
//! - [`unique()`], [`distinct()`]: deduplication
//! - [`sort()`]: stable multi-key sort
//! - [`filter()`]: equality filter, optionally sorted
//! - [`gen_filter()`]: lazy iteration over groups
//! - [`join()`], [`left_join()`]: single-key hash joins
//! - [`group_by()`]: grouping with totals
//! - [`aggregate()`]: grouping with `sum`/`count`/`avg`/`min`/`max`
//!
//! Most grouped operations rescan the whole input once per distinct key, so their cost grows
//! with `rows x groups`.
//!
//! ## Example: distinct → filter → aggregate
//!
//! ```rust
//! use rowkit::processing::Aggregations;
//! use rowkit::row;
//! use rowkit::types::{Fields, RowSequence, Value};
//!
//! let ds = RowSequence::new(vec![
//!     row! { "project" => "A", "hours" => 5 },
//!     row! { "project" => "A", "hours" => 3 },
//!     row! { "project" => "B", "hours" => 8 },
//! ]);
//!
//! let projects = ds.distinct("project").unwrap();
//! assert_eq!(projects.len(), 2);
//!
//! let a_rows = ds.filter(&row! { "project" => "A" }, Fields::none()).unwrap();
//! assert_eq!(a_rows.len(), 2);
//!
//! let report = ds
//!     .aggregate("project", &Aggregations::new().agg("hours", ["sum", "avg"]))
//!     .unwrap();
//! assert_eq!(report[0].get("hours_avg"), Some(&Value::Float64(4.0)));
//! ```

pub mod aggregate;
pub mod distinct;
pub mod filter;
pub mod group_by;
pub mod groups;
pub mod join;
mod keys;
pub mod sort;

pub use aggregate::{AggregateOp, Aggregations, aggregate};
pub use distinct::{distinct, unique};
pub use filter::filter;
pub use group_by::group_by;
pub use groups::{Groups, gen_filter};
pub use join::{join, left_join};
pub use sort::sort;

use crate::error::RowResult;
use crate::types::{Fields, GroupOrder, Row, RowSequence};

impl RowSequence {
    /// See [`unique()`].
    pub fn unique(&self) -> RowResult<RowSequence> {
        unique(self)
    }

    /// See [`distinct()`].
    pub fn distinct(&self, by: impl Into<Fields>) -> RowResult<RowSequence> {
        distinct(self, &by.into())
    }

    /// See [`sort()`].
    pub fn sort(&self, by: impl Into<Fields>, reverse: bool) -> RowResult<RowSequence> {
        sort(self, &by.into(), reverse)
    }

    /// See [`filter()`].
    pub fn filter(&self, criteria: &Row, order: impl Into<Fields>) -> RowResult<RowSequence> {
        filter(self, criteria, &order.into())
    }

    /// See [`gen_filter()`].
    pub fn gen_filter(&self, by: impl Into<Fields>, order: impl Into<GroupOrder>) -> RowResult<Groups<'_>> {
        gen_filter(self, &by.into(), order.into())
    }

    /// See [`join()`].
    pub fn join(&self, right: &RowSequence, key: &str) -> RowResult<RowSequence> {
        join(self, right, key)
    }

    /// See [`left_join()`].
    pub fn left_join(&self, right: &RowSequence, key: &str) -> RowResult<RowSequence> {
        left_join(self, right, key)
    }

    /// See [`group_by()`].
    pub fn group_by(
        &self,
        group_columns: impl Into<Fields>,
        total_columns: impl Into<Fields>,
    ) -> RowResult<RowSequence> {
        group_by(self, &group_columns.into(), &total_columns.into())
    }

    /// See [`aggregate()`].
    pub fn aggregate(
        &self,
        group_columns: impl Into<Fields>,
        aggregations: &Aggregations,
    ) -> RowResult<RowSequence> {
        aggregate(self, &group_columns.into(), aggregations)
    }
}
