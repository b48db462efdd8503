use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by the generative classifier.
pub enum ClassifierError {
    /// HTTP client construction failed.
    #[error("failed to build classifier HTTP client: {reason}")]
    ClientBuild {
        /// Error message.
        reason: String,
    },

    /// Transport-level failure (connect, timeout, body read).
    #[error("classifier request to '{url}' failed: {reason}")]
    RequestFailed {
        /// Endpoint URL.
        url: String,
        /// Error message.
        reason: String,
    },

    /// The endpoint answered with a non-2xx status.
    #[error("classifier returned HTTP {status}: {body}")]
    HttpStatus {
        /// Status code.
        status: u16,
        /// Response body (for diagnostics).
        body: String,
    },

    /// The response could not be parsed as a branch guess.
    #[error("classifier response not parseable as a branch guess: {reason}")]
    MalformedResponse {
        /// Error message.
        reason: String,
    },
}

/// Convenience result type for classifier operations.
pub type ClassifierResult<T> = Result<T, ClassifierError>;
