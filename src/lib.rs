//! `recordset` is a small library for querying in-memory collections of heterogeneous records
//! (field name → [`types::Value`] maps that need not share a schema) with column projections and
//! boolean masks.
//!
//! The primary type is [`collection::RecordCollection`]. Projecting a field gives a
//! [`series::ColumnView`]; comparing that view against a value gives a [`mask::Mask`]; applying
//! the mask back selects, removes or mutates records.
//!
//! ## Records and defaults
//!
//! Records are `BTreeMap<String, Value>` ([`types::Record`]); the [`record!`] macro builds one.
//! A collection carries a default value (normally [`types::Value::Null`]) that stands in for
//! fields a record does not have:
//!
//! ```rust
//! use recordset::collection::RecordCollection;
//! use recordset::record;
//! use recordset::types::Value;
//!
//! let c = RecordCollection::new(vec![
//!     record! { "a" => 1 },
//!     record! { "b" => 2 },
//!     record! { "b" => 3, "x" => 4 },
//! ]);
//! assert_eq!(c.get("a").values(), &[Value::Int64(1), Value::Null, Value::Null]);
//! ```
//!
//! ## Masks
//!
//! Comparisons never fail. An element that cannot be compared with the reference value (a
//! string against a number, a missing field, ...) simply yields `false`, so one expression can
//! scan records of any shape:
//!
//! ```rust
//! use recordset::collection::RecordCollection;
//! use recordset::record;
//!
//! let c = RecordCollection::new(vec![
//!     record! { "a" => 1 },
//!     record! { "b" => 2 },
//!     record! { "b" => "three" },
//! ]);
//!
//! let b = c.get("b");
//! assert_eq!(b.gt(1).count(), 1);
//!
//! // Masks compose with `&`, `|` and `!`.
//! let mask = &b.gt_eq(2) | &c.get("a").equal(1);
//! assert_eq!(c.where_mask(&mask).unwrap().len(), 2);
//!
//! // `-` removes by mask, by equal records, or by the exact record object.
//! assert_eq!((&c - &mask).len(), 1);
//! ```
//!
//! ## Mutation and transforms
//!
//! ```rust
//! use recordset::collection::RecordCollection;
//! use recordset::processing::{ApplyOptions, KeyedApply};
//! use recordset::record;
//! use recordset::types::Value;
//!
//! # fn main() -> Result<(), recordset::CollectionError> {
//! let mut c = RecordCollection::new(vec![record! { "a" => 1 }, record! { "b" => 2 }]);
//! c.set_all("e", 4);
//! c.set("s", vec![Value::from("Hi"), Value::Int64(10)])?;
//! assert_eq!(c.get("s").caseless_eq("HI").count(), 1);
//!
//! let bumped = c.kapply(
//!     &KeyedApply::new().field("a", |a| a.try_add(&Value::Int64(1))),
//!     &ApplyOptions::default(),
//! )?;
//! assert_eq!(bumped[0]["a"], Value::Int64(2));
//! assert!(!bumped[1].contains_key("a"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`collection`]: the record container, selection, assignment, concatenation and difference
//! - [`series`]: column views and their broadcast comparisons
//! - [`mask`]: boolean masks and their algebra
//! - [`compare`]: element-level comparison helpers
//! - [`processing`]: filter/apply/kapply/reduce and transform observers
//! - [`ingestion`]: building collections from JSON
//! - [`types`]: the value model
//! - [`error`]: error types used across the crate

pub mod collection;
pub mod compare;
pub mod error;
pub mod ingestion;
pub mod mask;
pub mod processing;
pub mod series;
pub mod types;

pub use collection::RecordCollection;
pub use error::{CollectionError, CollectionResult};
pub use mask::Mask;
pub use series::ColumnView;
pub use types::{Record, Value};
