//! Core value model.
//!
//! A [`Record`] maps field names to dynamically typed [`Value`]s. Records in the same
//! collection need not share any fields.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CollectionError, CollectionResult};

/// A single heterogeneous record: field name to value.
///
/// Fields are kept sorted by name, not in insertion order, so `Display`, iteration and
/// multi-field projections list fields alphabetically.
pub type Record = BTreeMap<String, Value>;

/// A single dynamically typed value held by a [`Record`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing/empty value. Also the default sentinel for absent fields.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// UTF-8 string.
    Utf8(String),
    /// Ordered list of values.
    List(Vec<Value>),
    /// Nested record.
    Map(Record),
}

impl Value {
    /// Short name of the value's kind, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int64(_) => "int64",
            Value::Float64(_) => "float64",
            Value::Utf8(_) => "utf8",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Whether this is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The payload of a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The payload of an `Int64`; floats are not converted.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view of the value: both `Int64` and `Float64` convert, everything else is `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int64(v) => Some(*v as f64),
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// The payload of a `Utf8`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Utf8(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The nested record of a `Map`.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Add two values.
    ///
    /// Integers add with overflow checking, mixing an integer with a float yields a float, and
    /// two strings concatenate. Every other pairing is a [`CollectionError::TypeMismatch`].
    pub fn try_add(&self, other: &Value) -> CollectionResult<Value> {
        match (self, other) {
            (Value::Int64(a), Value::Int64(b)) => a
                .checked_add(*b)
                .map(Value::Int64)
                .ok_or_else(|| CollectionError::invalid_argument("int64 addition overflowed")),
            (Value::Utf8(a), Value::Utf8(b)) => Ok(Value::Utf8(format!("{a}{b}"))),
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => Ok(Value::Float64(x + y)),
                _ => Err(mismatch(a, b)),
            },
        }
    }

    /// Subtract `other` from `self`. Only numeric pairings are supported.
    pub fn try_sub(&self, other: &Value) -> CollectionResult<Value> {
        match (self, other) {
            (Value::Int64(a), Value::Int64(b)) => a
                .checked_sub(*b)
                .map(Value::Int64)
                .ok_or_else(|| CollectionError::invalid_argument("int64 subtraction overflowed")),
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => Ok(Value::Float64(x - y)),
                _ => Err(mismatch(a, b)),
            },
        }
    }
}

fn mismatch(left: &Value, right: &Value) -> CollectionError {
    let expected = if left.as_f64().is_some() {
        "number"
    } else {
        left.type_name()
    };
    CollectionError::TypeMismatch {
        expected,
        found: right.type_name(),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v:?}"),
            Value::Utf8(s) => write!(f, "{s:?}"),
            Value::List(items) => write_list(f, items),
            Value::Map(record) => write_record(f, record),
        }
    }
}

pub(crate) fn write_list(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    f.write_str("[")?;
    for (i, v) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{v}")?;
    }
    f.write_str("]")
}

pub(crate) fn write_record(f: &mut fmt::Formatter<'_>, record: &Record) -> fmt::Result {
    f.write_str("{")?;
    for (i, (k, v)) in record.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{k:?}: {v}")?;
    }
    f.write_str("}")
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int64(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int64(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Utf8(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Utf8(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Map(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int64(i),
                // u64 beyond i64::MAX and real numbers both land here.
                None => n.as_f64().map(Value::Float64).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => Value::Utf8(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

/// Build a [`Record`] from `field => value` pairs.
///
/// ```rust
/// use recordset::record;
/// use recordset::types::Value;
///
/// let r = record! { "a" => 1, "name" => "Ada" };
/// assert_eq!(r.get("a"), Some(&Value::Int64(1)));
/// assert!(record! {}.is_empty());
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::types::Record::new()
    };
    ($($field:expr => $value:expr),+ $(,)?) => {{
        let mut record = $crate::types::Record::new();
        $(
            record.insert(::std::string::String::from($field), $crate::types::Value::from($value));
        )+
        record
    }};
}
