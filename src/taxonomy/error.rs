use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by taxonomy store operations.
pub enum TaxonomyError {
    /// The sub-category index file is missing or unreadable. Always fatal
    /// for a resolution; an empty index is never substituted for this.
    #[error("sub-category index unavailable at '{path}': {reason}")]
    IndexUnavailable {
        /// Index file path.
        path: PathBuf,
        /// Error message.
        reason: String,
    },

    /// No branch file exists for the given sub-category id.
    #[error("no branch file for sub-category id {id}")]
    BranchNotFound {
        /// Sub-category id used for the lookup.
        id: u64,
    },

    /// A line in a taxonomy file is not a valid node record.
    #[error("corrupt taxonomy file '{path}' at line {line}: {reason}")]
    Corrupt {
        /// File path.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Error message.
        reason: String,
    },

    /// A record's embedding dimension differs from the rest of the file.
    #[error(
        "embedding dimension mismatch in '{path}' at line {line}: expected {expected}, got {actual}"
    )]
    DimensionMismatch {
        /// File path.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Dimension of the file's first record.
        expected: usize,
        /// Dimension of the offending record.
        actual: usize,
    },

    /// Filesystem error outside the missing-index / missing-branch cases.
    #[error("taxonomy i/o error on '{path}': {source}")]
    Io {
        /// File or directory path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Convenience result type for taxonomy operations.
pub type TaxonomyResult<T> = Result<T, TaxonomyError>;
