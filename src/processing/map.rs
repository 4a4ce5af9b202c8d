//! Per-record and per-field transforms for [`RecordCollection`].
//!
//! Both [`RecordCollection::apply`] and [`RecordCollection::kapply`] are best-effort by default:
//! a transform that fails on one record does not fail the batch. What happens instead is
//! controlled by [`ErrorPolicy`]:
//!
//! - `apply` writes an empty record at the failing position (length is preserved).
//! - `kapply` leaves the failing field untouched on that record and still runs the remaining
//!   field transforms.
//!
//! With [`ErrorPolicy::Reraise`] the first failure aborts the call instead.

use std::fmt;
use std::sync::Arc;

use crate::collection::RecordCollection;
use crate::error::{BoxError, CollectionError, CollectionResult};
use crate::types::{Record, Value};

use super::observer::{ApplyContext, ApplyObserver, ApplyOperation, ApplyStats};

/// What to do when a caller-supplied transform fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Swallow the failure and keep going.
    #[default]
    Swallow,
    /// Abort the whole call with the failure.
    Reraise,
}

/// Options controlling [`RecordCollection::apply`] and [`RecordCollection::kapply`].
///
/// Use [`Default`] for the best-effort behavior.
#[derive(Clone, Default)]
pub struct ApplyOptions {
    pub on_error: ErrorPolicy,
    /// Optional observer notified of swallowed failures and completed runs.
    pub observer: Option<Arc<dyn ApplyObserver>>,
}

impl ApplyOptions {
    /// Options that propagate the first transform failure.
    pub fn reraise() -> Self {
        Self {
            on_error: ErrorPolicy::Reraise,
            ..Default::default()
        }
    }

    fn swallowed(&self, ctx: &ApplyContext, error: &CollectionError) {
        if let Some(obs) = &self.observer {
            obs.on_swallowed(ctx, error);
        }
    }

    fn completed(&self, ctx: &ApplyContext, stats: ApplyStats) {
        if let Some(obs) = &self.observer {
            obs.on_complete(ctx, stats);
        }
    }
}

impl fmt::Debug for ApplyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplyOptions")
            .field("on_error", &self.on_error)
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

type FieldTransform<'a> = Box<dyn Fn(&Value) -> Result<Value, BoxError> + 'a>;

/// Named field transforms for [`RecordCollection::kapply`], run in insertion order.
///
/// ```rust
/// use recordset::collection::RecordCollection;
/// use recordset::processing::{ApplyOptions, KeyedApply};
/// use recordset::record;
/// use recordset::types::Value;
///
/// let c = RecordCollection::new(vec![record! { "a" => 1 }, record! { "b" => 2 }]);
/// let out = c.kapply(
///     &KeyedApply::new().field("a", |a| a.try_add(&Value::Int64(1))),
///     &ApplyOptions::default(),
/// )
/// .unwrap();
/// assert_eq!(out[0]["a"], Value::Int64(2));
/// assert!(!out[1].contains_key("a"));
/// ```
#[derive(Default)]
pub struct KeyedApply<'a> {
    transforms: Vec<(String, FieldTransform<'a>)>,
}

impl<'a> KeyedApply<'a> {
    /// An empty set of transforms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fallible transform for `field`. It receives the current value (or the collection
    /// default when the record lacks the field).
    pub fn field<F, E>(mut self, field: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, E> + 'a,
        E: Into<BoxError>,
    {
        let transform: FieldTransform<'a> =
            Box::new(move |v: &Value| -> Result<Value, BoxError> { f(v).map_err(Into::into) });
        self.transforms.push((field.into(), transform));
        self
    }

    /// Add a transform for `field` that cannot fail.
    pub fn field_map<F>(self, field: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value) -> Value + 'a,
    {
        self.field(field, move |v: &Value| {
            Ok::<Value, std::convert::Infallible>(f(v))
        })
    }

    /// Number of registered field transforms.
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Whether no transform has been registered.
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

impl fmt::Debug for KeyedApply<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.transforms.iter().map(|(name, _)| name))
            .finish()
    }
}

impl RecordCollection {
    /// A new collection where record `i` is `f(record i)`.
    ///
    /// Under [`ErrorPolicy::Swallow`] a failing record becomes an empty record; under
    /// [`ErrorPolicy::Reraise`] the failure is returned as [`CollectionError::Callback`].
    pub fn apply<F, E>(&self, mut f: F, options: &ApplyOptions) -> CollectionResult<Self>
    where
        F: FnMut(&Record) -> Result<Record, E>,
        E: Into<BoxError>,
    {
        let ctx = ApplyContext {
            operation: ApplyOperation::Apply,
            records: self.len(),
        };
        let mut out = Vec::with_capacity(self.len());
        let mut failures = 0usize;

        for (index, record) in self.iter().enumerate() {
            match f(record) {
                Ok(mapped) => out.push(mapped),
                Err(e) => {
                    let err = CollectionError::Callback {
                        index,
                        source: e.into(),
                    };
                    if options.on_error == ErrorPolicy::Reraise {
                        return Err(err);
                    }
                    failures += 1;
                    options.swallowed(&ctx, &err);
                    out.push(Record::new());
                }
            }
        }

        options.completed(
            &ctx,
            ApplyStats {
                records: out.len(),
                failures,
            },
        );
        Ok(Self::with_default(out, self.default_value().clone()))
    }

    /// A new collection where each record is a copy of the input with every keyed transform
    /// applied: `record[field] = f(record[field] or default)`.
    ///
    /// Under [`ErrorPolicy::Swallow`] a failing transform leaves that field as it was and the
    /// remaining transforms still run; under [`ErrorPolicy::Reraise`] the failure is returned as
    /// [`CollectionError::FieldCallback`].
    pub fn kapply(&self, transforms: &KeyedApply<'_>, options: &ApplyOptions) -> CollectionResult<Self> {
        let ctx = ApplyContext {
            operation: ApplyOperation::KeyedApply,
            records: self.len(),
        };
        let default = self.default_value();
        let mut out = Vec::with_capacity(self.len());
        let mut failures = 0usize;

        for (index, record) in self.iter().enumerate() {
            let mut record = record.clone();
            for (field, f) in &transforms.transforms {
                match f(record.get(field).unwrap_or(default)) {
                    Ok(v) => {
                        record.insert(field.clone(), v);
                    }
                    Err(source) => {
                        let err = CollectionError::FieldCallback {
                            index,
                            field: field.clone(),
                            source,
                        };
                        if options.on_error == ErrorPolicy::Reraise {
                            return Err(err);
                        }
                        failures += 1;
                        options.swallowed(&ctx, &err);
                    }
                }
            }
            out.push(record);
        }

        options.completed(
            &ctx,
            ApplyStats {
                records: out.len(),
                failures,
            },
        );
        Ok(Self::with_default(out, default.clone()))
    }
}

/// Returns a new collection by applying `mapper` to every record.
///
/// This is the infallible counterpart of [`RecordCollection::apply`].
pub fn map<F>(collection: &RecordCollection, mapper: F) -> RecordCollection
where
    F: FnMut(&Record) -> Record,
{
    RecordCollection::with_default(
        collection.iter().map(mapper).collect(),
        collection.default_value().clone(),
    )
}

/// Convenience wrapper around [`RecordCollection::apply`].
pub fn apply<F, E>(
    collection: &RecordCollection,
    f: F,
    options: &ApplyOptions,
) -> CollectionResult<RecordCollection>
where
    F: FnMut(&Record) -> Result<Record, E>,
    E: Into<BoxError>,
{
    collection.apply(f, options)
}

/// Convenience wrapper around [`RecordCollection::kapply`].
pub fn kapply(
    collection: &RecordCollection,
    transforms: &KeyedApply<'_>,
    options: &ApplyOptions,
) -> CollectionResult<RecordCollection> {
    collection.kapply(transforms, options)
}
