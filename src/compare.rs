//! Element-level comparison helpers behind [`crate::series::ColumnView`].
//!
//! Every helper here answers "not comparable" with `None` instead of failing; callers turn that
//! into a `false` mask entry.

use std::borrow::Cow;
use std::cmp::Ordering;

use crate::types::{Record, Value};

/// Broadcast comparison operators supported by [`crate::series::ColumnView::compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Gt,
    GtEq,
    Lt,
    LtEq,
    Eq,
    NotEq,
    /// Strict typed equality (same variant, same payload).
    Is,
}

impl CompareOp {
    /// Evaluate the operator on one pair. `None` means the pair is not comparable.
    pub fn evaluate(self, left: &Value, right: &Value) -> Option<bool> {
        match self {
            CompareOp::Gt => try_compare(left, right).map(Ordering::is_gt),
            CompareOp::GtEq => try_compare(left, right).map(Ordering::is_ge),
            CompareOp::Lt => try_compare(left, right).map(Ordering::is_lt),
            CompareOp::LtEq => try_compare(left, right).map(Ordering::is_le),
            CompareOp::Eq => Some(values_equal(left, right)),
            CompareOp::NotEq => Some(!values_equal(left, right)),
            CompareOp::Is => Some(left == right),
        }
    }
}

/// Order two values, or `None` when they cannot be ordered.
///
/// Numbers order numerically across `Int64`/`Float64`, strings and bools by their natural
/// order, and lists lexicographically. Nulls, maps, NaN and mixed kinds are unordered.
pub fn try_compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Int64(a), Value::Int64(b)) => Some(a.cmp(b)),
        (Value::Utf8(a), Value::Utf8(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::List(a), Value::List(b)) => {
            for (x, y) in a.iter().zip(b) {
                match try_compare(x, y)? {
                    Ordering::Equal => continue,
                    other => return Some(other),
                }
            }
            Some(a.len().cmp(&b.len()))
        }
        (Value::Float64(a), Value::Float64(b)) => a.partial_cmp(b),
        (Value::Int64(a), Value::Float64(b)) => cmp_int_float(*a, *b),
        (Value::Float64(a), Value::Int64(b)) => cmp_int_float(*b, *a).map(Ordering::reverse),
        _ => None,
    }
}

/// Value equality: exact numeric across `Int64`/`Float64`, structural for lists and maps.
///
/// Values of different kinds are unequal rather than incomparable. `Bool` is not numeric, so
/// `true` never equals `1`.
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Int64(a), Value::Int64(b)) => a == b,
        (Value::Utf8(a), Value::Utf8(b)) => a == b,
        (Value::List(a), Value::List(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
        }
        (Value::Map(a), Value::Map(b)) => records_equal(a, b),
        (Value::Float64(a), Value::Float64(b)) => a == b,
        (Value::Int64(i), Value::Float64(f)) | (Value::Float64(f), Value::Int64(i)) => {
            cmp_int_float(*i, *f) == Some(Ordering::Equal)
        }
        _ => false,
    }
}

/// Exact ordering of an integer against a float, without rounding the integer through `f64`.
fn cmp_int_float(i: i64, f: f64) -> Option<Ordering> {
    // 2^63; every finite float in [-2^63, 2^63) truncates to a representable i64.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if f.is_nan() {
        return None;
    }
    if f >= LIMIT {
        return Some(Ordering::Less);
    }
    if f < -LIMIT {
        return Some(Ordering::Greater);
    }
    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => 0.0f64.partial_cmp(&(f - whole)),
        other => Some(other),
    }
}

/// Record equality: same field names with pairwise [`values_equal`] values.
pub fn records_equal(left: &Record, right: &Record) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .all(|((ka, va), (kb, vb))| ka == kb && values_equal(va, vb))
}

/// Lower-case strings; every other value passes through unchanged.
pub fn lowerish(value: &Value) -> Cow<'_, Value> {
    match value {
        Value::Utf8(s) => Cow::Owned(Value::Utf8(s.to_lowercase())),
        other => Cow::Borrowed(other),
    }
}

/// Case-insensitive string equality. Non-strings are not comparable.
pub fn caseless_eq(left: &Value, right: &Value) -> Option<bool> {
    match (left, right) {
        (Value::Utf8(a), Value::Utf8(b)) => Some(a.to_lowercase() == b.to_lowercase()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::{caseless_eq, lowerish, try_compare, values_equal, CompareOp};
    use crate::record;
    use crate::types::Value;

    #[test]
    fn numbers_compare_across_int_and_float() {
        assert_eq!(try_compare(&Value::Int64(2), &Value::Float64(1.5)), Some(Ordering::Greater));
        assert!(values_equal(&Value::Int64(1), &Value::Float64(1.0)));
        assert_eq!(try_compare(&Value::Float64(f64::NAN), &Value::Int64(1)), None);
    }

    #[test]
    fn mixed_kinds_are_unordered_but_unequal() {
        assert_eq!(try_compare(&Value::Null, &Value::Int64(1)), None);
        assert_eq!(try_compare(&Value::from("a"), &Value::Int64(1)), None);
        assert!(!values_equal(&Value::from("1"), &Value::Int64(1)));
        assert_eq!(CompareOp::NotEq.evaluate(&Value::Null, &Value::Int64(1)), Some(true));
        assert_eq!(CompareOp::Gt.evaluate(&Value::Null, &Value::Int64(1)), None);
    }

    #[test]
    fn large_integers_compare_exactly_against_floats() {
        let big = Value::Int64(9_007_199_254_740_993);
        let near = Value::Float64(9_007_199_254_740_992.0);
        assert!(!values_equal(&big, &near));
        assert_eq!(try_compare(&big, &near), Some(Ordering::Greater));
        assert_eq!(try_compare(&near, &big), Some(Ordering::Less));

        assert!(values_equal(&Value::Int64(-3), &Value::Float64(-3.0)));
        assert_eq!(try_compare(&Value::Int64(0), &Value::Float64(-0.5)), Some(Ordering::Greater));
        assert_eq!(try_compare(&Value::Int64(2), &Value::Float64(2.5)), Some(Ordering::Less));
        assert_eq!(
            try_compare(&Value::Int64(i64::MAX), &Value::Float64(9_223_372_036_854_775_808.0)),
            Some(Ordering::Less)
        );
        assert_eq!(
            try_compare(&Value::Int64(i64::MIN), &Value::Float64(f64::NEG_INFINITY)),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn bools_are_not_numbers() {
        assert!(!values_equal(&Value::Bool(true), &Value::Int64(1)));
        assert_eq!(try_compare(&Value::Bool(true), &Value::Int64(0)), None);
    }

    #[test]
    fn lists_compare_lexicographically() {
        let a = Value::List(vec![Value::Int64(1), Value::Int64(2)]);
        let b = Value::List(vec![Value::Int64(1), Value::Int64(3)]);
        let c = Value::List(vec![Value::Int64(1)]);
        assert_eq!(try_compare(&a, &b), Some(Ordering::Less));
        assert_eq!(try_compare(&a, &c), Some(Ordering::Greater));
        let mixed = Value::List(vec![Value::from("x")]);
        assert_eq!(try_compare(&c, &mixed), None);
    }

    #[test]
    fn maps_are_equal_but_unordered() {
        let a = Value::Map(record! { "k" => 1 });
        let b = Value::Map(record! { "k" => 1.0 });
        assert!(values_equal(&a, &b));
        assert_eq!(try_compare(&a, &b), None);
    }

    #[test]
    fn is_requires_same_variant() {
        assert_eq!(CompareOp::Is.evaluate(&Value::Int64(1), &Value::Float64(1.0)), Some(false));
        assert_eq!(CompareOp::Is.evaluate(&Value::Null, &Value::Null), Some(true));
    }

    #[test]
    fn caseless_helpers_only_touch_strings() {
        assert_eq!(lowerish(&Value::from("Hi")).into_owned(), Value::from("hi"));
        assert_eq!(lowerish(&Value::Int64(10)).into_owned(), Value::Int64(10));
        assert_eq!(caseless_eq(&Value::from("Hi"), &Value::from("HI")), Some(true));
        assert_eq!(caseless_eq(&Value::Int64(10), &Value::from("10")), None);
    }
}
