//! `rowkit` is a small in-memory toolkit for relational-style work over a sequence of key-value
//! rows: deduplication, multi-key sorting, filtering, grouping with aggregation, and joins.
//!
//! It targets ad-hoc reports over small-to-medium datasets where a database would be overkill.
//! Rows are duck-typed ([`types::Row`] is an ordered field → [`types::Value`] mapping) and every
//! operation returns a new [`types::RowSequence`] without touching its input.
//!
//! ## Modules
//!
//! - [`types`]: `Value`, `Row`, `RowSequence` and the parameter types (`Fields`, `GroupOrder`)
//! - [`processing`]: the operations (`unique`, `distinct`, `sort`, `filter`, `gen_filter`,
//!   `join`, `left_join`, `group_by`, `aggregate`)
//! - [`ingestion`]: decoding rows from CSV / JSON / NDJSON files
//! - [`export`]: writing results back out as JSON or CSV
//! - [`error`]: the shared error type
//!
//! ## Example: timesheet report
//!
//! ```rust
//! use rowkit::row;
//! use rowkit::types::RowSequence;
//!
//! let ds = RowSequence::new(vec![
//!     row! { "project" => "A", "user" => "Anna", "hours" => 2, "cost" => 100 },
//!     row! { "project" => "A", "user" => "Anna", "hours" => 1, "cost" => 150 },
//!     row! { "project" => "A", "user" => "Ivan", "hours" => 3, "cost" => 200 },
//!     row! { "project" => "B", "user" => "Ivan", "hours" => 4, "cost" => 300 },
//! ]);
//!
//! let report = ds.group_by(["project", "user"], ["hours", "cost"]).unwrap();
//! assert_eq!(
//!     report,
//!     vec![
//!         row! { "project" => "A", "user" => "Anna", "hours" => 3, "cost" => 250 },
//!         row! { "project" => "A", "user" => "Ivan", "hours" => 3, "cost" => 200 },
//!         row! { "project" => "B", "user" => "Ivan", "hours" => 4, "cost" => 300 },
//!     ]
//! );
//! ```
//!
//! ## Error policy
//!
//! Operations never panic on caller data. Missing sort or join keys, unhashable nested values,
//! non-numeric aggregation inputs and unknown operator names are all returned as
//! [`RowError`]; see [`error::ErrorKind`] for the lookup/type/value split. Soft defaults (a
//! missing field in a filter, a missing or null aggregation input) are not errors.
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade (`debug!` per operation, `trace!` per group) and
//! never installs a logger itself.

pub mod error;
pub mod export;
pub mod ingestion;
pub mod processing;
pub mod types;

pub use error::{ErrorKind, RowError, RowResult};
