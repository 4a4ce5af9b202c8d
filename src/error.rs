use thiserror::Error;

/// Boxed error produced by caller-supplied closures (predicates and transforms).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Convenience result type for collection operations.
pub type CollectionResult<T> = Result<T, CollectionError>;

/// Error type returned by record collection operations.
///
/// Structural misuse (wrong argument shapes, mismatched lengths, bad indices) is always reported
/// through this enum. Per-element failures inside vectorized operations (comparisons, `apply`
/// without re-raising, `kapply`) are not errors at all; see [`crate::processing::map`].
#[derive(Debug, Error)]
pub enum CollectionError {
    /// An argument has an unusable shape (e.g. an empty field list for a multi-field projection).
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A value of the wrong kind was supplied (e.g. appending a non-map as a record).
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A sequence or mask does not line up with the collection it is applied to.
    #[error("length mismatch: sequence length ({actual}) not equal to collection length ({expected})")]
    LengthMismatch { expected: usize, actual: usize },

    /// A positional index lies beyond the end of the collection.
    #[error("index {index} out of bounds for collection of length {len}")]
    OutOfBounds { index: usize, len: usize },

    /// A caller-supplied predicate or transform failed on the record at `index`.
    #[error("callback failed at record {index}: {source}")]
    Callback {
        index: usize,
        #[source]
        source: BoxError,
    },

    /// A keyed transform failed for `field` on the record at `index`.
    #[error("transform for field '{field}' failed at record {index}: {source}")]
    FieldCallback {
        index: usize,
        field: String,
        #[source]
        source: BoxError,
    },

    /// Underlying I/O error while reading input (e.g. file not found).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A line of NDJSON input is not valid JSON.
    #[error("invalid ndjson at line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl CollectionError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub(crate) fn check_len(expected: usize, actual: usize) -> CollectionResult<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::LengthMismatch { expected, actual })
        }
    }
}
