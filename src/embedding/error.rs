use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by the embedding client.
pub enum EmbedderError {
    /// HTTP client construction failed.
    #[error("failed to build embedder HTTP client: {reason}")]
    ClientBuild {
        /// Error message.
        reason: String,
    },

    /// Transport-level failure (connect, timeout, body read).
    #[error("embedding request to '{url}' failed: {reason}")]
    RequestFailed {
        /// Endpoint URL.
        url: String,
        /// Error message.
        reason: String,
    },

    /// The endpoint answered with a non-2xx status.
    #[error("embedder returned HTTP {status}: {body}")]
    HttpStatus {
        /// Status code.
        status: u16,
        /// Response body (for diagnostics).
        body: String,
    },

    /// The response did not contain an embedding.
    #[error("embedder response malformed: {reason}")]
    MalformedResponse {
        /// Error message.
        reason: String,
    },
}

/// Convenience result type for embedding operations.
pub type EmbedderResult<T> = Result<T, EmbedderError>;
