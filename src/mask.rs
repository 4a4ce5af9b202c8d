//! Boolean masks used to select records.

use std::ops::{BitAnd, BitOr, BitXor, Not};

use crate::error::{CollectionError, CollectionResult};

/// An ordered sequence of booleans, one per record or column element.
///
/// Masks are produced by [`crate::series::ColumnView`] comparisons (or built directly) and
/// consumed by [`crate::collection::RecordCollection::select`] and friends. They compose
/// element-wise with `&`, `|`, `^` and `!`.
///
/// # Panics
///
/// The binary operators panic if the two masks differ in length.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mask {
    bits: Vec<bool>,
}

impl Mask {
    /// Wrap an existing sequence of booleans.
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// A mask of `len` entries all set to `value`.
    pub fn full(len: usize, value: bool) -> Self {
        Self {
            bits: vec![value; len],
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the mask has no entries.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The entry at `idx`, if any.
    pub fn get(&self, idx: usize) -> Option<bool> {
        self.bits.get(idx).copied()
    }

    /// Number of `true` entries.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }

    /// Whether at least one entry is `true`.
    pub fn any(&self) -> bool {
        self.bits.iter().any(|b| *b)
    }

    /// Whether every entry is `true` (vacuously true when empty).
    pub fn all(&self) -> bool {
        self.bits.iter().all(|b| *b)
    }

    /// Iterate over the entries in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// Borrow the entries as a slice.
    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    /// Positions of the `true` entries, in order.
    pub fn true_indices(&self) -> Vec<usize> {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(i, b)| b.then_some(i))
            .collect()
    }

    /// Element-wise AND. Fails with [`CollectionError::LengthMismatch`] on unequal lengths.
    pub fn try_and(&self, other: &Mask) -> CollectionResult<Mask> {
        self.zip_with(other, |a, b| a && b)
    }

    /// Element-wise OR. Fails with [`CollectionError::LengthMismatch`] on unequal lengths.
    pub fn try_or(&self, other: &Mask) -> CollectionResult<Mask> {
        self.zip_with(other, |a, b| a || b)
    }

    /// Element-wise XOR. Fails with [`CollectionError::LengthMismatch`] on unequal lengths.
    pub fn try_xor(&self, other: &Mask) -> CollectionResult<Mask> {
        self.zip_with(other, |a, b| a != b)
    }

    fn zip_with(&self, other: &Mask, op: impl Fn(bool, bool) -> bool) -> CollectionResult<Mask> {
        CollectionError::check_len(self.len(), other.len())?;
        Ok(self
            .bits
            .iter()
            .zip(&other.bits)
            .map(|(a, b)| op(*a, *b))
            .collect())
    }

    fn invert(&self) -> Mask {
        self.bits.iter().map(|b| !b).collect()
    }
}

impl From<Vec<bool>> for Mask {
    fn from(bits: Vec<bool>) -> Self {
        Self::new(bits)
    }
}

impl FromIterator<bool> for Mask {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Mask {
    type Item = bool;
    type IntoIter = std::vec::IntoIter<bool>;

    fn into_iter(self) -> Self::IntoIter {
        self.bits.into_iter()
    }
}

macro_rules! mask_binop {
    ($trait:ident, $method:ident, $checked:ident) => {
        impl $trait<&Mask> for &Mask {
            type Output = Mask;

            fn $method(self, rhs: &Mask) -> Mask {
                match self.$checked(rhs) {
                    Ok(mask) => mask,
                    Err(e) => panic!("cannot combine masks: {e}"),
                }
            }
        }

        impl $trait<Mask> for Mask {
            type Output = Mask;

            fn $method(self, rhs: Mask) -> Mask {
                (&self).$method(&rhs)
            }
        }

        impl $trait<&Mask> for Mask {
            type Output = Mask;

            fn $method(self, rhs: &Mask) -> Mask {
                (&self).$method(rhs)
            }
        }
    };
}

// Operator forms panic on length mismatch; the `try_*` methods return `LengthMismatch` instead.
mask_binop!(BitAnd, bitand, try_and);
mask_binop!(BitOr, bitor, try_or);
mask_binop!(BitXor, bitxor, try_xor);

impl Not for &Mask {
    type Output = Mask;

    fn not(self) -> Mask {
        self.invert()
    }
}

impl Not for Mask {
    type Output = Mask;

    fn not(self) -> Mask {
        self.invert()
    }
}

#[cfg(test)]
mod tests {
    use super::Mask;
    use crate::error::CollectionError;

    #[test]
    fn logical_composition_is_element_wise() {
        let a = Mask::from(vec![true, true, false, false]);
        let b = Mask::from(vec![true, false, true, false]);

        assert_eq!(&a & &b, Mask::from(vec![true, false, false, false]));
        assert_eq!(&a | &b, Mask::from(vec![true, true, true, false]));
        assert_eq!(&a ^ &b, Mask::from(vec![false, true, true, false]));
        assert_eq!(!a.clone(), Mask::from(vec![false, false, true, true]));
        // Operands are consumed or borrowed interchangeably.
        assert_eq!((a & b).count(), 1);
    }

    #[test]
    fn try_and_reports_length_mismatch() {
        let a = Mask::full(3, true);
        let b = Mask::full(2, true);
        let err = a.try_and(&b).unwrap_err();
        assert!(matches!(err, CollectionError::LengthMismatch { expected: 3, actual: 2 }));
    }

    #[test]
    #[should_panic(expected = "cannot combine masks")]
    fn operator_panics_on_length_mismatch() {
        let _ = Mask::full(3, true) | Mask::full(1, false);
    }

    #[test]
    fn queries() {
        let m: Mask = [false, true, true].into_iter().collect();
        assert_eq!(m.len(), 3);
        assert_eq!(m.count(), 2);
        assert!(m.any());
        assert!(!m.all());
        assert_eq!(m.get(1), Some(true));
        assert_eq!(m.get(9), None);
        assert_eq!(m.true_indices(), vec![1, 2]);
        assert!(Mask::default().is_empty());
        assert!(Mask::default().all());
    }
}
