//! Reduction operations over a [`ColumnView`].

use crate::series::ColumnView;
use crate::types::Value;

/// Built-in reduction operations over a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Count all elements (including nulls and non-numeric values).
    Count,
    /// Sum numeric values, ignoring everything else.
    Sum,
    /// Minimum numeric value, ignoring everything else.
    Min,
    /// Maximum numeric value, ignoring everything else.
    Max,
    /// Arithmetic mean of numeric values, ignoring everything else.
    Mean,
}

/// Reduce a column using a built-in [`ReduceOp`].
///
/// - `Count` always returns `Value::Int64(len)`.
/// - `Sum`/`Min`/`Max` stay `Int64` while every numeric element is an integer and switch to
///   `Float64` as soon as one float is seen. `Mean` is always `Float64`.
/// - Numeric ops return `Value::Null` when the column has no numeric values.
pub fn reduce(column: &ColumnView, op: ReduceOp) -> Value {
    match op {
        ReduceOp::Count => Value::Int64(column.len() as i64),
        ReduceOp::Mean => {
            let nums: Vec<f64> = column.iter().filter_map(Value::as_f64).collect();
            if nums.is_empty() {
                Value::Null
            } else {
                Value::Float64(nums.iter().sum::<f64>() / nums.len() as f64)
            }
        }
        ReduceOp::Sum | ReduceOp::Min | ReduceOp::Max => reduce_numeric(column, op),
    }
}

#[derive(Clone, Copy)]
enum Acc {
    Int(i64),
    Float(f64),
}

fn reduce_numeric(column: &ColumnView, op: ReduceOp) -> Value {
    let mut acc: Option<Acc> = None;
    for v in column.iter() {
        let next = match v {
            Value::Int64(x) => Acc::Int(*x),
            Value::Float64(x) => Acc::Float(*x),
            _ => continue,
        };
        acc = Some(match acc {
            None => next,
            Some(a) => combine(a, next, op),
        });
    }
    match acc {
        Some(Acc::Int(v)) => Value::Int64(v),
        Some(Acc::Float(v)) => Value::Float64(v),
        None => Value::Null,
    }
}

fn combine(a: Acc, b: Acc, op: ReduceOp) -> Acc {
    match (a, b) {
        (Acc::Int(x), Acc::Int(y)) => match op {
            // Integer overflow falls back to float rather than wrapping.
            ReduceOp::Sum => x
                .checked_add(y)
                .map(Acc::Int)
                .unwrap_or(Acc::Float(x as f64 + y as f64)),
            ReduceOp::Min => Acc::Int(x.min(y)),
            ReduceOp::Max => Acc::Int(x.max(y)),
            _ => unreachable!("non-numeric op handled earlier"),
        },
        (a, b) => {
            let (x, y) = (as_f64(a), as_f64(b));
            Acc::Float(match op {
                ReduceOp::Sum => x + y,
                ReduceOp::Min => x.min(y),
                ReduceOp::Max => x.max(y),
                _ => unreachable!("non-numeric op handled earlier"),
            })
        }
    }
}

fn as_f64(a: Acc) -> f64 {
    match a {
        Acc::Int(v) => v as f64,
        Acc::Float(v) => v,
    }
}
