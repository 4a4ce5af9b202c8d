//! Record filtering for [`crate::collection::RecordCollection`].

use crate::collection::RecordCollection;
use crate::error::CollectionResult;
use crate::mask::Mask;
use crate::types::Record;

/// Returns a new [`RecordCollection`] containing only records for which `predicate` returns
/// `true`.
///
/// This is a convenience wrapper around [`RecordCollection::filter`].
pub fn filter<F>(collection: &RecordCollection, predicate: F) -> RecordCollection
where
    F: FnMut(&Record) -> bool,
{
    collection.filter(predicate)
}

/// Returns a new [`RecordCollection`] containing only records whose `mask` entry is `true`.
///
/// This is a convenience wrapper around [`RecordCollection::where_mask`].
pub fn filter_mask(collection: &RecordCollection, mask: &Mask) -> CollectionResult<RecordCollection> {
    collection.where_mask(mask)
}
