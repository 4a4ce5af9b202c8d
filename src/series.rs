//! Column views: one field projected across every record of a collection.

use std::fmt;

use crate::compare::{caseless_eq, lowerish, values_equal, CompareOp};
use crate::mask::Mask;
use crate::processing::reduce::{reduce, ReduceOp};
use crate::types::{write_list, Value};

/// A detached, ordered sequence of values (one per record at projection time).
///
/// Comparisons broadcast a single reference value over every element and never fail: an
/// element that cannot be compared with the reference produces a `false` mask entry.
///
/// ```rust
/// use recordset::series::ColumnView;
/// use recordset::types::Value;
///
/// let s = ColumnView::new(vec![Value::Int64(1), Value::from("two"), Value::Int64(3)]);
/// assert_eq!(s.gt(1).as_slice(), &[false, false, true]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnView {
    values: Vec<Value>,
}

impl ColumnView {
    /// Create a free-standing column from values.
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column has no elements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The element at `idx`, if any.
    pub fn get(&self, idx: usize) -> Option<&Value> {
        self.values.get(idx)
    }

    /// Iterate over the elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// Borrow the elements as a slice.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Consume the column and return its elements.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Build a mask from a per-element predicate; `None` (not comparable) becomes `false`.
    pub fn map_mask<F>(&self, mut f: F) -> Mask
    where
        F: FnMut(&Value) -> Option<bool>,
    {
        self.values.iter().map(|v| f(v).unwrap_or(false)).collect()
    }

    /// Compare every element against `value` with `op`.
    pub fn compare(&self, value: impl Into<Value>, op: CompareOp) -> Mask {
        let value = value.into();
        self.map_mask(|v| op.evaluate(v, &value))
    }

    /// Elements ordered after `value`.
    pub fn gt(&self, value: impl Into<Value>) -> Mask {
        self.compare(value, CompareOp::Gt)
    }

    /// Elements ordered after or equal to `value`.
    pub fn gt_eq(&self, value: impl Into<Value>) -> Mask {
        self.compare(value, CompareOp::GtEq)
    }

    /// Elements ordered before `value`.
    pub fn lt(&self, value: impl Into<Value>) -> Mask {
        self.compare(value, CompareOp::Lt)
    }

    /// Elements ordered before or equal to `value`.
    pub fn lt_eq(&self, value: impl Into<Value>) -> Mask {
        self.compare(value, CompareOp::LtEq)
    }

    /// Value equality (`1 == 1.0`, compared exactly even for integers beyond 2^53); differing
    /// kinds are unequal.
    ///
    /// `Bool` is not numeric here: `true` does not equal `1` and `false` does not equal `0`.
    pub fn equal(&self, value: impl Into<Value>) -> Mask {
        self.compare(value, CompareOp::Eq)
    }

    /// Negation of [`Self::equal`]; differing kinds count as not equal.
    pub fn not_equal(&self, value: impl Into<Value>) -> Mask {
        self.compare(value, CompareOp::NotEq)
    }

    /// Strict typed equality: same variant and same payload.
    pub fn is_identical(&self, value: impl Into<Value>) -> Mask {
        self.compare(value, CompareOp::Is)
    }

    /// Elements that are `Null` (including fields filled with a `Null` default).
    pub fn is_null(&self) -> Mask {
        self.values.iter().map(Value::is_null).collect()
    }

    /// Membership test against `values`.
    ///
    /// Members match by the same value equality as [`Self::equal`], so `true` is not in `[1]`.
    /// With `case_sensitive == false`, strings on both sides are lower-cased before the test;
    /// other values pass through unchanged.
    pub fn is_in<I, V>(&self, values: I, case_sensitive: bool) -> Mask
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let members: Vec<Value> = values
            .into_iter()
            .map(|v| {
                let v = v.into();
                if case_sensitive {
                    v
                } else {
                    lowerish(&v).into_owned()
                }
            })
            .collect();

        self.map_mask(|v| {
            let v = if case_sensitive {
                std::borrow::Cow::Borrowed(v)
            } else {
                lowerish(v)
            };
            Some(members.iter().any(|m| values_equal(&v, m)))
        })
    }

    /// Case-insensitive string equality; non-string elements yield `false`.
    pub fn caseless_eq(&self, value: impl Into<Value>) -> Mask {
        let value = value.into();
        self.map_mask(|v| caseless_eq(v, &value))
    }

    /// Numeric export: `Int64`/`Float64` as `f64`, everything else `None`.
    pub fn to_f64(&self) -> Vec<Option<f64>> {
        self.values.iter().map(Value::as_f64).collect()
    }

    /// Reduce the column with a built-in [`ReduceOp`].
    pub fn reduce(&self, op: ReduceOp) -> Value {
        reduce(self, op)
    }
}

impl From<Vec<Value>> for ColumnView {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

impl FromIterator<Value> for ColumnView {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for ColumnView {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a ColumnView {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl fmt::Display for ColumnView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, &self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::ColumnView;
    use crate::compare::CompareOp;
    use crate::types::Value;

    fn mixed() -> ColumnView {
        ColumnView::new(vec![
            Value::Int64(1),
            Value::Null,
            Value::from("3"),
            Value::Float64(2.5),
            Value::List(vec![]),
            Value::Bool(true),
        ])
    }

    #[test]
    fn comparisons_never_fail_on_mixed_types() {
        let s = mixed();
        for op in [
            CompareOp::Gt,
            CompareOp::GtEq,
            CompareOp::Lt,
            CompareOp::LtEq,
            CompareOp::Eq,
            CompareOp::NotEq,
            CompareOp::Is,
        ] {
            for reference in [Value::Int64(2), Value::from("x"), Value::Null] {
                assert_eq!(s.compare(reference, op).len(), s.len());
            }
        }
    }

    #[test]
    fn ordering_only_matches_comparable_elements() {
        let s = mixed();
        assert_eq!(s.gt(2).as_slice(), &[false, false, false, true, false, false]);
        assert_eq!(s.lt_eq(1).as_slice(), &[true, false, false, false, false, false]);
        assert_eq!(s.gt_eq("3").count(), 1);
    }

    #[test]
    fn comparisons_against_floats_keep_integer_precision() {
        let s = ColumnView::new(vec![Value::Int64(9_007_199_254_740_993)]);
        let near = Value::Float64(9_007_199_254_740_992.0);
        assert_eq!(s.equal(near.clone()).as_slice(), &[false]);
        assert_eq!(s.not_equal(near.clone()).as_slice(), &[true]);
        assert_eq!(s.gt(near.clone()).as_slice(), &[true]);
        assert_eq!(s.is_in([near], true).as_slice(), &[false]);
    }

    #[test]
    fn bools_do_not_match_numbers() {
        let s = ColumnView::new(vec![Value::Bool(true), Value::Int64(1)]);
        assert_eq!(s.equal(1).as_slice(), &[false, true]);
        assert_eq!(s.is_in([Value::Int64(1)], true).as_slice(), &[false, true]);
        assert_eq!(s.equal(true).as_slice(), &[true, false]);
    }

    #[test]
    fn equality_is_numeric_but_identity_is_strict() {
        let s = ColumnView::new(vec![Value::Int64(1), Value::Float64(1.0), Value::from("1")]);
        assert_eq!(s.equal(1).as_slice(), &[true, true, false]);
        assert_eq!(s.not_equal(1).as_slice(), &[false, false, true]);
        assert_eq!(s.is_identical(1).as_slice(), &[true, false, false]);
    }

    #[test]
    fn caseless_and_membership() {
        let s = ColumnView::new(vec![Value::from("Hi"), Value::from("hi"), Value::Int64(10)]);
        assert_eq!(s.caseless_eq("HI").count(), 2);
        assert_eq!(s.is_in([Value::from("hi"), Value::Int64(10)], true).count(), 2);
        assert_eq!(s.is_in([Value::from("hi"), Value::Int64(10)], false).count(), 3);
        assert_eq!(s.is_in([Value::from("HI")], false).count(), 2);
        assert_eq!(s.is_in(Vec::<Value>::new(), true).count(), 0);
    }

    #[test]
    fn null_mask_and_numeric_export() {
        let s = mixed();
        assert_eq!(s.is_null().true_indices(), vec![1]);
        assert_eq!(
            s.to_f64(),
            vec![Some(1.0), None, None, Some(2.5), None, None]
        );
    }

    #[test]
    fn display_lists_values() {
        let s: ColumnView = vec![Value::Int64(1), Value::Null].into_iter().collect();
        assert_eq!(s.to_string(), "[1, null]");
    }
}
