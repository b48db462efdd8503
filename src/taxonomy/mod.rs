//! The static taxonomy corpus and its JSONL-backed store.
//!
//! The corpus is produced offline by the taxonomy-construction pipeline and
//! is immutable for the lifetime of the process: a flat index of
//! sub-category nodes plus one pre-flattened descendant file per
//! sub-category, each record carrying its embedding.

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod store;
pub mod types;


pub use error::{TaxonomyError, TaxonomyResult};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockTaxonomyStore;
pub use store::{JsonlTaxonomyStore, TaxonomyStore};
pub use types::TaxonomyNode;
