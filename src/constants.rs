//! Cross-cutting, shared constants.
//!
//! Prefer deriving secondary constants from primary ones to avoid drift.
//! Per-resolution limits are runtime-configurable through
//! [`ResolverConfig`](crate::resolver::ResolverConfig); the values here are
//! the defaults it starts from.

/// Sub-category candidates kept after the index ranking stage.
pub const DEFAULT_TOP_SUBCATEGORIES: usize = 3;

/// Leaf candidates kept per branch after descendant ranking.
pub const DEFAULT_TOP_LEAVES_PER_BRANCH: usize = 5;

/// Records in the final, aggregated resolution.
pub const DEFAULT_TOP_RESULTS: usize = 3;

/// Per-request timeout for classifier and embedder calls, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Similarity forced by an exact name match. Outranks any embedding score.
pub const EXACT_MATCH_SIMILARITY: f32 = 1.0;

/// Decimal places kept when a similarity is serialized for display.
/// Full precision is retained internally for sorting.
pub const SIMILARITY_DISPLAY_DECIMALS: i32 = 4;

/// File name of the sub-category index inside the taxonomy directory.
pub const SUBCATEGORY_INDEX_FILENAME: &str = "sub-category-embedding.jsonl";
