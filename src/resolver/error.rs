use std::time::Duration;
use thiserror::Error;

use crate::classifier::ClassifierError;
use crate::embedding::EmbedderError;
use crate::taxonomy::TaxonomyError;

#[derive(Debug, Error)]
/// Errors that abort a resolution.
///
/// Branch-local store failures never appear here; they degrade to empty
/// branches. An all-branches-empty resolution is an `Ok(vec![])`, not an
/// error.
pub enum ResolveError {
    /// Classifier call failed. No fallback classification exists.
    #[error("classification failed: {0}")]
    Classifier(#[from] ClassifierError),

    /// One of the required embedding calls failed.
    #[error("embedding failed: {0}")]
    Embedder(#[from] EmbedderError),

    /// Index-level store failure.
    #[error("taxonomy store failed: {0}")]
    Store(#[from] TaxonomyError),

    /// Classifier succeeded but proposed no usable sub-category.
    #[error("classifier produced no usable sub-category guess")]
    EmptyGuess,

    /// A caller-supplied limit was non-positive.
    #[error("invalid resolver configuration: {reason}")]
    InvalidConfig {
        /// Error message.
        reason: String,
    },

    /// The caller-level deadline elapsed before the funnel finished.
    #[error("resolution deadline of {deadline:?} exceeded")]
    DeadlineExceeded {
        /// The configured deadline.
        deadline: Duration,
    },
}

/// Convenience result type for resolution operations.
pub type ResolveResult<T> = Result<T, ResolveError>;
