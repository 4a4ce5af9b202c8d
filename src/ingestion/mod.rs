//! Construction paths that turn external input into a [`crate::collection::RecordCollection`].
//!
//! Format-specific functions are available under:
//! - [`json`]

pub mod json;

pub use json::{records_from_json_path, records_from_json_str};
