//! In-memory record transformations.
//!
//! The processing layer operates on [`crate::collection::RecordCollection`] values and the
//! [`crate::series::ColumnView`]s projected from them.
//!
//! Currently implemented:
//!
//! - [`filter()`] / [`filter_mask()`]: record filtering by predicate or mask
//! - [`map()`], [`apply()`], [`kapply()`]: per-record and per-field transforms
//! - [`reduce()`]: common reductions over a column (count/sum/min/max/mean)
//!
//! ## Example: filter → kapply → reduce
//!
//! ```rust
//! use recordset::collection::RecordCollection;
//! use recordset::processing::{filter, reduce, ApplyOptions, KeyedApply, ReduceOp};
//! use recordset::record;
//! use recordset::types::Value;
//!
//! let c = RecordCollection::new(vec![
//!     record! { "id" => 1, "active" => true, "score" => 10.0 },
//!     record! { "id" => 2, "active" => false, "score" => 20.0 },
//!     record! { "id" => 3, "active" => true },
//! ]);
//!
//! // Keep only active records.
//! let active = filter(&c, |r| r.get("active") == Some(&Value::Bool(true)));
//!
//! // Double the score where there is one.
//! let doubled = active
//!     .kapply(
//!         &KeyedApply::new().field("score", |s| s.try_add(s)),
//!         &ApplyOptions::default(),
//!     )
//!     .unwrap();
//!
//! // Sum scores (missing ones ignored).
//! assert_eq!(reduce(&doubled.get("score"), ReduceOp::Sum), Value::Float64(20.0));
//! ```

pub mod filter;
pub mod map;
pub mod observer;
pub mod reduce;

pub use filter::{filter, filter_mask};
pub use map::{apply, kapply, map, ApplyOptions, ErrorPolicy, KeyedApply};
pub use observer::{
    ApplyContext, ApplyObserver, ApplyOperation, ApplyStats, CompositeObserver, StdErrObserver,
};
pub use reduce::{reduce, ReduceOp};
