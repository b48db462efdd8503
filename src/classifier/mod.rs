//! Generative branch-guess classifier.
//!
//! One classifier call per resolution proposes a plausible taxonomy branch
//! (top category plus sub-categories with freshly written descriptions).
//! The guess seeds the funnel; it is never trusted as a final answer.

pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod types;

#[cfg(test)]
mod tests;

pub use client::{ClassifierConfig, GenerativeClassifier};
pub use error::{ClassifierError, ClassifierResult};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockClassifier;
pub use types::{BranchGuess, SubCategoryGuess, TopCategoryGuess};

use async_trait::async_trait;

/// Free text in, structured branch guess out.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Proposes taxonomy branches for `text`. Malformed or failed calls
    /// surface as [`ClassifierError`]; there is no fallback classification.
    async fn classify(&self, text: &str) -> ClassifierResult<BranchGuess>;
}
