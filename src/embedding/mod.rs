//! Embedding generation via an external embedding service.
//!
//! Each resolution embeds two different texts: the guessed sub-category
//! description (for index ranking) and the original input (for leaf
//! ranking). The two answer different questions and are never conflated.

pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use client::{EmbedderConfig, HttpEmbedder};
pub use error::{EmbedderError, EmbedderResult};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbedder;

use async_trait::async_trait;

/// Text in, fixed-length float vector out.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embeds `text`. Failures surface as [`EmbedderError`] and abort the
    /// resolution that needed the vector.
    async fn embed(&self, text: &str) -> EmbedderResult<Vec<f32>>;
}
