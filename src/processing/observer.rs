use std::fmt;
use std::sync::Arc;

use crate::error::CollectionError;

/// Which bulk transform is reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOperation {
    /// [`crate::collection::RecordCollection::apply`].
    Apply,
    /// [`crate::collection::RecordCollection::kapply`].
    KeyedApply,
}

/// Context about a bulk transform run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyContext {
    pub operation: ApplyOperation,
    /// Number of input records.
    pub records: usize,
}

/// Minimal stats reported when a bulk transform completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyStats {
    /// Number of output records.
    pub records: usize,
    /// Number of per-record (or per-field) failures that were swallowed.
    pub failures: usize,
}

/// Observer interface for bulk transforms.
///
/// Swallowed per-record failures are otherwise silent; implementors can log or count them.
pub trait ApplyObserver: Send + Sync {
    /// Called for every failure that the error policy swallowed.
    fn on_swallowed(&self, _ctx: &ApplyContext, _error: &CollectionError) {}

    /// Called once the transform has produced its output.
    fn on_complete(&self, _ctx: &ApplyContext, _stats: ApplyStats) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ApplyObserver>>,
}

impl CompositeObserver {
    /// Create a composite observer that forwards to each of `observers` in order.
    pub fn new(observers: Vec<Arc<dyn ApplyObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl ApplyObserver for CompositeObserver {
    fn on_swallowed(&self, ctx: &ApplyContext, error: &CollectionError) {
        for o in &self.observers {
            o.on_swallowed(ctx, error);
        }
    }

    fn on_complete(&self, ctx: &ApplyContext, stats: ApplyStats) {
        for o in &self.observers {
            o.on_complete(ctx, stats);
        }
    }
}

/// Logs transform events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl ApplyObserver for StdErrObserver {
    fn on_swallowed(&self, ctx: &ApplyContext, error: &CollectionError) {
        eprintln!("[{:?}][swallowed] records={} err={}", ctx.operation, ctx.records, error);
    }

    fn on_complete(&self, ctx: &ApplyContext, stats: ApplyStats) {
        eprintln!(
            "[{:?}][ok] records={} failures={}",
            ctx.operation, stats.records, stats.failures
        );
    }
}
