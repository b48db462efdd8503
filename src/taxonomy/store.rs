use std::path::{Path, PathBuf};
use std::sync::Arc;

use moka::sync::Cache;
use tracing::debug;

use crate::constants::SUBCATEGORY_INDEX_FILENAME;

use super::error::{TaxonomyError, TaxonomyResult};
use super::types::TaxonomyNode;

/// Branch loads cached per sub-category id. The corpus is immutable for the
/// process lifetime, so entries are never invalidated.
const DEFAULT_BRANCH_CACHE_CAPACITY: u64 = 256;

/// Read access to the static taxonomy corpus.
///
/// Loads are pure reads and idempotent. Implementations may cache per-id
/// branch loads; they must never mutate the corpus.
pub trait TaxonomyStore: Send + Sync {
    /// Loads the flat index of all second-level nodes with embeddings.
    ///
    /// A missing or unreadable index is an explicit
    /// [`TaxonomyError::IndexUnavailable`], never an empty result.
    fn load_subcategory_index(
        &self,
    ) -> impl std::future::Future<Output = TaxonomyResult<Vec<TaxonomyNode>>> + Send;

    /// Loads the flattened descendant subtree of one sub-category,
    /// addressed by id only.
    fn load_descendants(
        &self,
        sub_category_id: u64,
    ) -> impl std::future::Future<Output = TaxonomyResult<Vec<TaxonomyNode>>> + Send;
}

/// Filesystem store over a directory of newline-delimited JSON files.
///
/// Layout: `sub-category-embedding.jsonl` as the index, one branch file per
/// sub-category. Branch files are addressed solely by numeric id:
/// `{id}.jsonl` canonically, with the legacy `{id}-{name}.jsonl` layout
/// accepted via an id-prefix scan. The name part is never a lookup key.
#[derive(Clone)]
pub struct JsonlTaxonomyStore {
    root: PathBuf,
    branch_cache: Cache<u64, Arc<Vec<TaxonomyNode>>>,
}

impl std::fmt::Debug for JsonlTaxonomyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonlTaxonomyStore")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl JsonlTaxonomyStore {
    /// Creates a store rooted at `root` with the default branch cache size.
    pub fn new(root: PathBuf) -> Self {
        Self::with_cache_capacity(root, DEFAULT_BRANCH_CACHE_CAPACITY)
    }

    /// Creates a store with an explicit branch cache capacity.
    pub fn with_cache_capacity(root: PathBuf, capacity: u64) -> Self {
        Self {
            root,
            branch_cache: Cache::builder().max_capacity(capacity).build(),
        }
    }

    /// Root directory of the corpus.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn index_path(&self) -> PathBuf {
        self.root.join(SUBCATEGORY_INDEX_FILENAME)
    }

    /// Resolves the branch file for `id`: `{id}.jsonl` when present,
    /// otherwise the lexicographically first `{id}-*.jsonl` match.
    async fn branch_path(&self, id: u64) -> TaxonomyResult<PathBuf> {
        let canonical = self.root.join(format!("{id}.jsonl"));
        if matches!(tokio::fs::try_exists(&canonical).await, Ok(true)) {
            return Ok(canonical);
        }

        let prefix = format!("{id}-");
        let mut matches: Vec<PathBuf> = Vec::new();

        let mut entries =
            tokio::fs::read_dir(&self.root)
                .await
                .map_err(|source| TaxonomyError::Io {
                    path: self.root.clone(),
                    source,
                })?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|source| TaxonomyError::Io {
                path: self.root.clone(),
                source,
            })?
        {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if name.starts_with(&prefix) && name.ends_with(".jsonl") {
                matches.push(entry.path());
            }
        }

        matches.sort();
        matches
            .into_iter()
            .next()
            .ok_or(TaxonomyError::BranchNotFound { id })
    }
}

impl TaxonomyStore for JsonlTaxonomyStore {
    async fn load_subcategory_index(&self) -> TaxonomyResult<Vec<TaxonomyNode>> {
        let path = self.index_path();
        let contents =
            tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| TaxonomyError::IndexUnavailable {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;

        let nodes = parse_records(&path, &contents)?;
        debug!(path = %path.display(), nodes = nodes.len(), "Loaded sub-category index");
        Ok(nodes)
    }

    async fn load_descendants(&self, sub_category_id: u64) -> TaxonomyResult<Vec<TaxonomyNode>> {
        if let Some(cached) = self.branch_cache.get(&sub_category_id) {
            return Ok(cached.as_ref().clone());
        }

        let path = self.branch_path(sub_category_id).await?;
        let contents =
            tokio::fs::read_to_string(&path)
                .await
                .map_err(|source| TaxonomyError::Io {
                    path: path.clone(),
                    source,
                })?;

        let nodes = parse_records(&path, &contents)?;
        debug!(
            sub_category_id,
            path = %path.display(),
            nodes = nodes.len(),
            "Loaded branch descendants"
        );

        self.branch_cache
            .insert(sub_category_id, Arc::new(nodes.clone()));
        Ok(nodes)
    }
}

/// Parses one JSONL taxonomy file. Blank lines are skipped; a malformed
/// line or a dimension differing from the file's first record is an error.
fn parse_records(path: &Path, contents: &str) -> TaxonomyResult<Vec<TaxonomyNode>> {
    let mut nodes: Vec<TaxonomyNode> = Vec::new();
    let mut expected_dim: Option<usize> = None;

    for (idx, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let node: TaxonomyNode =
            serde_json::from_str(line).map_err(|e| TaxonomyError::Corrupt {
                path: path.to_path_buf(),
                line: idx + 1,
                reason: e.to_string(),
            })?;

        match expected_dim {
            None => expected_dim = Some(node.dimension()),
            Some(expected) if node.dimension() != expected => {
                return Err(TaxonomyError::DimensionMismatch {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    expected,
                    actual: node.dimension(),
                });
            }
            Some(_) => {}
        }

        nodes.push(node);
    }

    Ok(nodes)
}
