//! The record collection: an ordered container of heterogeneous records.
//!
//! Data flows `RecordCollection` → [`ColumnView`] (project a field) → [`Mask`] (compare) →
//! `RecordCollection` (select, subtract or mutate).
//!
//! ```rust
//! use recordset::collection::RecordCollection;
//! use recordset::record;
//!
//! let c = RecordCollection::new(vec![
//!     record! { "a" => 1 },
//!     record! { "b" => 2 },
//!     record! { "b" => 3, "x" => 4 },
//! ]);
//!
//! let b = c.get("b");
//! let between = &b.gt_eq(2) & &b.lt(3);
//! assert_eq!(c.where_mask(&between).unwrap().len(), 1);
//! ```

mod ops;

use std::collections::BTreeSet;
use std::fmt;
use std::ops::{Bound, RangeBounds};

use crate::compare::records_equal;
use crate::error::{BoxError, CollectionError, CollectionResult};
use crate::mask::Mask;
use crate::series::ColumnView;
use crate::types::{write_record, Record, Value};

/// How records are chosen by [`RecordCollection::select`].
pub enum Selector<'a> {
    /// Keep records whose mask entry is `true`.
    Mask(&'a Mask),
    /// Keep records for which the predicate returns `true`.
    Predicate(&'a dyn Fn(&Record) -> bool),
}

impl<'a> From<&'a Mask> for Selector<'a> {
    fn from(mask: &'a Mask) -> Self {
        Selector::Mask(mask)
    }
}

/// Right-hand side of a field assignment ([`RecordCollection::set`]).
#[derive(Debug, Clone, PartialEq)]
pub enum Assignment {
    /// Write the same value into every record.
    Broadcast(Value),
    /// Write value `i` into record `i`; the length must match the collection.
    Each(Vec<Value>),
}

impl From<Value> for Assignment {
    fn from(v: Value) -> Self {
        Assignment::Broadcast(v)
    }
}

impl From<Vec<Value>> for Assignment {
    fn from(vs: Vec<Value>) -> Self {
        Assignment::Each(vs)
    }
}

impl From<ColumnView> for Assignment {
    fn from(view: ColumnView) -> Self {
        Assignment::Each(view.into_values())
    }
}

/// Records appended by [`RecordCollection::concat`] and `+`/`+=`.
#[derive(Debug, Clone, PartialEq)]
pub enum Extension {
    Collection(RecordCollection),
    Records(Vec<Record>),
    Record(Record),
}

impl From<RecordCollection> for Extension {
    fn from(c: RecordCollection) -> Self {
        Extension::Collection(c)
    }
}

impl From<&RecordCollection> for Extension {
    fn from(c: &RecordCollection) -> Self {
        Extension::Collection(c.clone())
    }
}

impl From<Vec<Record>> for Extension {
    fn from(records: Vec<Record>) -> Self {
        Extension::Records(records)
    }
}

impl From<Record> for Extension {
    fn from(record: Record) -> Self {
        Extension::Record(record)
    }
}

impl Extension {
    fn into_records(self) -> Vec<Record> {
        match self {
            Extension::Collection(c) => c.items,
            Extension::Records(records) => records,
            Extension::Record(record) => vec![record],
        }
    }
}

/// Records removed by [`RecordCollection::difference`] and `-`/`-=`.
#[derive(Debug, Clone, Copy)]
pub enum Subtrahend<'a> {
    /// Remove records whose mask entry is `true`.
    Mask(&'a Mask),
    /// Remove records equal to any of these.
    Records(&'a [Record]),
    /// Remove the record stored at this address; an equal copy elsewhere is kept.
    ///
    /// The pointer is only compared, never dereferenced, so it holds no borrow and can name a
    /// record of the collection being mutated: `c -= Subtrahend::identity(&c[0])`.
    Identity(*const Record),
}

impl Subtrahend<'_> {
    /// Name one specific record object by its address.
    pub fn identity(record: &Record) -> Self {
        Subtrahend::Identity(record)
    }
}

impl<'a> From<&'a Mask> for Subtrahend<'a> {
    fn from(mask: &'a Mask) -> Self {
        Subtrahend::Mask(mask)
    }
}

impl<'a> From<&'a [Record]> for Subtrahend<'a> {
    fn from(records: &'a [Record]) -> Self {
        Subtrahend::Records(records)
    }
}

impl<'a> From<&'a Vec<Record>> for Subtrahend<'a> {
    fn from(records: &'a Vec<Record>) -> Self {
        Subtrahend::Records(records.as_slice())
    }
}

impl<'a> From<&'a RecordCollection> for Subtrahend<'a> {
    fn from(c: &'a RecordCollection) -> Self {
        Subtrahend::Records(c.records())
    }
}

impl<'a> From<&'a Record> for Subtrahend<'a> {
    fn from(record: &'a Record) -> Self {
        Subtrahend::identity(record)
    }
}

/// An ordered sequence of heterogeneous records plus the default value returned for absent
/// fields.
///
/// Collections derived from this one (slices, selections, differences, projections and
/// transforms) keep the same default.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordCollection {
    items: Vec<Record>,
    default: Value,
}

impl RecordCollection {
    /// Create a collection whose default for absent fields is [`Value::Null`].
    pub fn new(records: Vec<Record>) -> Self {
        Self::with_default(records, Value::Null)
    }

    /// Create a collection that returns `default` for fields a record does not have.
    pub fn with_default(records: Vec<Record>, default: impl Into<Value>) -> Self {
        Self {
            items: records,
            default: default.into(),
        }
    }

    /// Build a collection from dynamically typed values, each of which must be a map.
    pub fn from_values(values: Vec<Value>, default: impl Into<Value>) -> CollectionResult<Self> {
        let items = values
            .into_iter()
            .map(into_record)
            .collect::<CollectionResult<Vec<_>>>()?;
        Ok(Self::with_default(items, default))
    }

    fn derive(&self, items: Vec<Record>) -> Self {
        Self {
            items,
            default: self.default.clone(),
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection holds no records.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Borrow the records in order.
    pub fn records(&self) -> &[Record] {
        &self.items
    }

    /// Iterate over the records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.items.iter()
    }

    /// Iterate mutably over the records in order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Record> {
        self.items.iter_mut()
    }

    /// Consume the collection and return its records.
    pub fn into_records(self) -> Vec<Record> {
        self.items
    }

    /// Value substituted for fields a record does not have.
    pub fn default_value(&self) -> &Value {
        &self.default
    }

    /// Union of the field names of every record, computed on demand.
    pub fn attrs(&self) -> BTreeSet<String> {
        self.items
            .iter()
            .flat_map(|r| r.keys().cloned())
            .collect()
    }

    /// Project `field` across every record; records without it contribute the default.
    pub fn get(&self, field: &str) -> ColumnView {
        self.items
            .iter()
            .map(|r| r.get(field).unwrap_or(&self.default).clone())
            .collect()
    }

    /// Project several fields: each output record holds exactly `fields`, absent ones set to
    /// the default. Output records are ordered by field name like every [`Record`], whatever
    /// order `fields` is given in.
    pub fn get_fields<S: AsRef<str>>(&self, fields: &[S]) -> CollectionResult<Self> {
        if fields.is_empty() {
            return Err(CollectionError::invalid_argument(
                "must pass at least one field to get_fields",
            ));
        }
        let items = self
            .items
            .iter()
            .map(|r| {
                fields
                    .iter()
                    .map(|f| {
                        let f = f.as_ref();
                        (f.to_string(), r.get(f).unwrap_or(&self.default).clone())
                    })
                    .collect()
            })
            .collect();
        Ok(self.derive(items))
    }

    /// The record at position `index`.
    pub fn at(&self, index: usize) -> CollectionResult<&Record> {
        let len = self.len();
        self.items
            .get(index)
            .ok_or(CollectionError::OutOfBounds { index, len })
    }

    /// Mutable access to the record at `index`.
    pub fn at_mut(&mut self, index: usize) -> CollectionResult<&mut Record> {
        let len = self.len();
        self.items
            .get_mut(index)
            .ok_or(CollectionError::OutOfBounds { index, len })
    }

    /// A new collection over a contiguous range. Bounds past the end are clamped, so an
    /// out-of-range slice is empty rather than an error.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Self {
        let len = self.len();
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        }
        .min(len);
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => len,
        }
        .min(len);
        if start >= end {
            return self.derive(Vec::new());
        }
        self.derive(self.items[start..end].to_vec())
    }

    /// Evaluate `predicate` on every record, in order.
    pub fn mask_by<F>(&self, predicate: F) -> Mask
    where
        F: FnMut(&Record) -> bool,
    {
        self.items.iter().map(predicate).collect()
    }

    /// Keep the records chosen by a mask or a predicate, preserving order.
    pub fn select<'a>(&self, selector: impl Into<Selector<'a>>) -> CollectionResult<Self> {
        match selector.into() {
            Selector::Mask(mask) => self.where_mask(mask),
            Selector::Predicate(predicate) => Ok(self.filter(predicate)),
        }
    }

    /// Keep the records whose mask entry is `true`.
    ///
    /// The mask must have exactly one entry per record.
    pub fn where_mask(&self, mask: &Mask) -> CollectionResult<Self> {
        CollectionError::check_len(self.len(), mask.len())?;
        let items = self
            .items
            .iter()
            .zip(mask.iter())
            .filter_map(|(r, keep)| keep.then(|| r.clone()))
            .collect();
        Ok(self.derive(items))
    }

    /// Keep the records for which `predicate` returns `true`.
    pub fn filter<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&Record) -> bool,
    {
        let items = self
            .items
            .iter()
            .filter(|r| predicate(*r))
            .cloned()
            .collect();
        self.derive(items)
    }

    /// Like [`Self::filter`] with a fallible predicate. The first failure aborts the whole call.
    pub fn try_filter<F, E>(&self, mut predicate: F) -> CollectionResult<Self>
    where
        F: FnMut(&Record) -> Result<bool, E>,
        E: Into<BoxError>,
    {
        let mut items = Vec::new();
        for (index, r) in self.items.iter().enumerate() {
            let keep = predicate(r).map_err(|e| CollectionError::Callback {
                index,
                source: e.into(),
            })?;
            if keep {
                items.push(r.clone());
            }
        }
        Ok(self.derive(items))
    }

    /// Assign `field` on every record, either broadcasting one value or writing one value per
    /// record.
    ///
    /// A per-record assignment whose length differs from the collection fails with
    /// [`CollectionError::LengthMismatch`] and leaves the collection untouched.
    pub fn set(&mut self, field: &str, assignment: impl Into<Assignment>) -> CollectionResult<()> {
        match assignment.into() {
            Assignment::Broadcast(v) => {
                self.set_all(field, v);
                Ok(())
            }
            Assignment::Each(vs) => self.set_each(field, vs),
        }
    }

    /// Write `value` into `field` of every record, replacing any existing value.
    pub fn set_all(&mut self, field: &str, value: impl Into<Value>) {
        let value = value.into();
        for r in &mut self.items {
            r.insert(field.to_string(), value.clone());
        }
    }

    /// Write `values[i]` into `field` of record `i`. Fails with
    /// [`CollectionError::LengthMismatch`] before touching any record if the lengths differ.
    pub fn set_each(&mut self, field: &str, values: Vec<Value>) -> CollectionResult<()> {
        CollectionError::check_len(self.len(), values.len())?;
        for (r, v) in self.items.iter_mut().zip(values) {
            r.insert(field.to_string(), v);
        }
        Ok(())
    }

    /// Push one record to the end.
    pub fn append(&mut self, record: Record) {
        self.items.push(record);
    }

    /// Append a dynamically typed value; anything other than a map is rejected.
    pub fn append_value(&mut self, value: Value) -> CollectionResult<()> {
        let record = into_record(value)?;
        self.items.push(record);
        Ok(())
    }

    /// A new collection holding these records followed by `other`'s.
    pub fn concat(&self, other: impl Into<Extension>) -> Self {
        let mut out = self.clone();
        out.extend_with(other);
        out
    }

    /// In-place form of [`Self::concat`].
    pub fn extend_with(&mut self, other: impl Into<Extension>) {
        self.items.extend(other.into().into_records());
    }

    /// Whether a record equal to `record` is present.
    pub fn contains(&self, record: &Record) -> bool {
        self.items.iter().any(|r| records_equal(r, record))
    }

    /// A new collection without the records named by `subtrahend`.
    ///
    /// - [`Subtrahend::Mask`]: drop records whose entry is `true` (the complement of
    ///   [`Self::where_mask`]); the mask length must match.
    /// - [`Subtrahend::Records`]: drop records equal to any of the given ones.
    /// - [`Subtrahend::Identity`]: drop only that exact record object.
    pub fn difference<'a>(&self, subtrahend: impl Into<Subtrahend<'a>>) -> CollectionResult<Self> {
        let keep = self.keep_mask(subtrahend.into())?;
        self.where_mask(&keep)
    }

    /// In-place form of [`Self::difference`].
    ///
    /// To remove one record of this collection by identity, build the operand with
    /// [`Subtrahend::identity`] first so no borrow of `self` is held.
    pub fn subtract<'a>(&mut self, subtrahend: impl Into<Subtrahend<'a>>) -> CollectionResult<()> {
        let keep = self.keep_mask(subtrahend.into())?;
        let mut bits = keep.into_iter();
        self.items.retain(|_| bits.next().unwrap_or(false));
        Ok(())
    }

    fn keep_mask(&self, subtrahend: Subtrahend<'_>) -> CollectionResult<Mask> {
        match subtrahend {
            Subtrahend::Mask(mask) => {
                CollectionError::check_len(self.len(), mask.len())?;
                Ok(!mask)
            }
            Subtrahend::Records(others) => Ok(self.mask_by(|r| {
                !others.iter().any(|o| records_equal(r, o))
            })),
            Subtrahend::Identity(target) => Ok(self.mask_by(|r| !std::ptr::eq(r, target))),
        }
    }
}

fn into_record(value: Value) -> CollectionResult<Record> {
    match value {
        Value::Map(record) => Ok(record),
        other => Err(CollectionError::TypeMismatch {
            expected: "map",
            found: other.type_name(),
        }),
    }
}

impl FromIterator<Record> for RecordCollection {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for RecordCollection {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecordCollection {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for RecordCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, r) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write_record(f, r)?;
        }
        f.write_str("]")
    }
}
