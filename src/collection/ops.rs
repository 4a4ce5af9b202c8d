//! Operator sugar over [`RecordCollection`]: `c[i]`, `+`, `+=`, `-`, `-=`.

use std::ops::{Add, AddAssign, Index, Sub, SubAssign};

use super::{Extension, RecordCollection, Subtrahend};
use crate::types::Record;

/// # Panics
///
/// Panics if `index` is out of bounds; use [`RecordCollection::at`] for a checked lookup.
impl Index<usize> for RecordCollection {
    type Output = Record;

    fn index(&self, index: usize) -> &Record {
        &self.items[index]
    }
}

impl<T: Into<Extension>> Add<T> for &RecordCollection {
    type Output = RecordCollection;

    fn add(self, rhs: T) -> RecordCollection {
        self.concat(rhs)
    }
}

impl<T: Into<Extension>> Add<T> for RecordCollection {
    type Output = RecordCollection;

    fn add(mut self, rhs: T) -> RecordCollection {
        self.extend_with(rhs);
        self
    }
}

impl<T: Into<Extension>> AddAssign<T> for RecordCollection {
    fn add_assign(&mut self, rhs: T) {
        self.extend_with(rhs);
    }
}

/// # Panics
///
/// Panics if a mask operand differs in length from the collection; use
/// [`RecordCollection::difference`] to get the error instead.
impl<'a, T: Into<Subtrahend<'a>>> Sub<T> for &RecordCollection {
    type Output = RecordCollection;

    fn sub(self, rhs: T) -> RecordCollection {
        match self.difference(rhs) {
            Ok(out) => out,
            Err(e) => panic!("cannot subtract from collection: {e}"),
        }
    }
}

/// # Panics
///
/// Panics if a mask operand differs in length from the collection; use
/// [`RecordCollection::subtract`] to get the error instead.
impl<'a, T: Into<Subtrahend<'a>>> SubAssign<T> for RecordCollection {
    fn sub_assign(&mut self, rhs: T) {
        if let Err(e) = self.subtract(rhs) {
            panic!("cannot subtract from collection: {e}");
        }
    }
}
