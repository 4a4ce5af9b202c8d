//! JSON construction path for [`RecordCollection`].
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"a":1}, {"b":2}]`
//! - A single JSON object: `{"a":1}`
//! - Newline-delimited JSON (NDJSON): `{"a":1}\n{"b":2}\n`
//!
//! Objects are taken as-is: there is no schema, so records may have disjoint fields.

use std::fs;
use std::path::Path;

use crate::collection::RecordCollection;
use crate::error::{CollectionError, CollectionResult};
use crate::types::Value;

/// Read a JSON/NDJSON file into a [`RecordCollection`].
pub fn records_from_json_path(
    path: impl AsRef<Path>,
    default: impl Into<Value>,
) -> CollectionResult<RecordCollection> {
    let text = fs::read_to_string(path)?;
    records_from_json_str(&text, default)
}

/// Parse JSON/NDJSON from an in-memory string into a [`RecordCollection`].
pub fn records_from_json_str(
    input: &str,
    default: impl Into<Value>,
) -> CollectionResult<RecordCollection> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CollectionError::invalid_argument("json input is empty"));
    }

    // First try parsing as a single JSON value (array or object).
    let values = if let Ok(v) = serde_json::from_str::<serde_json::Value>(trimmed) {
        match v {
            serde_json::Value::Array(items) => items,
            serde_json::Value::Object(_) => vec![v],
            _ => {
                return Err(CollectionError::invalid_argument(
                    "json must be an object, an array of objects, or NDJSON",
                ));
            }
        }
    } else {
        // Fall back to NDJSON.
        let mut values = Vec::new();
        for (i, line) in trimmed.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let v = serde_json::from_str::<serde_json::Value>(line)
                .map_err(|source| CollectionError::Json { line: i + 1, source })?;
            values.push(v);
        }
        values
    };

    json_values_to_collection(values, default.into())
}

fn json_values_to_collection(
    values: Vec<serde_json::Value>,
    default: Value,
) -> CollectionResult<RecordCollection> {
    let mut records = Vec::with_capacity(values.len());
    for (idx0, v) in values.into_iter().enumerate() {
        let row_num = idx0 + 1;
        match Value::from(v) {
            Value::Map(record) => records.push(record),
            other => {
                return Err(CollectionError::invalid_argument(format!(
                    "row {row_num} is not a json object (found {})",
                    other.type_name()
                )));
            }
        }
    }
    Ok(RecordCollection::with_default(records, default))
}

#[cfg(test)]
mod tests {
    use super::records_from_json_str;
    use crate::error::CollectionError;
    use crate::types::Value;

    #[test]
    fn parses_array_of_heterogeneous_objects() {
        let c = records_from_json_str(r#"[{"a":1}, {"b":2}, {"b":3,"x":4}]"#, Value::Null).unwrap();
        assert_eq!(c.len(), 3);
        assert_eq!(c.get("b").values(), &[Value::Null, Value::Int64(2), Value::Int64(3)]);
    }

    #[test]
    fn parses_single_object_and_ndjson() {
        assert_eq!(records_from_json_str(r#"{"a":1}"#, Value::Null).unwrap().len(), 1);

        let input = "{\"a\":1}\n\n{\"a\":2.5}\n";
        let c = records_from_json_str(input, Value::Null).unwrap();
        assert_eq!(c.get("a").values(), &[Value::Int64(1), Value::Float64(2.5)]);
    }

    #[test]
    fn rejects_empty_scalar_and_non_object_rows() {
        assert!(matches!(
            records_from_json_str("   ", Value::Null).unwrap_err(),
            CollectionError::InvalidArgument { .. }
        ));
        assert!(records_from_json_str("42", Value::Null).is_err());

        let err = records_from_json_str(r#"[{"a":1}, 2]"#, Value::Null).unwrap_err();
        assert!(err.to_string().contains("row 2 is not a json object"));
    }

    #[test]
    fn reports_bad_ndjson_line() {
        let err = records_from_json_str("{\"a\":1}\n{oops}\n", Value::Null).unwrap_err();
        assert!(err.to_string().contains("invalid ndjson at line 2"));
        assert!(matches!(err, CollectionError::Json { line: 2, .. }));
        assert!(std::error::Error::source(&err).is_some());
    }
}
