//! In-memory taxonomy store for tests.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use super::error::{TaxonomyError, TaxonomyResult};
use super::store::TaxonomyStore;
use super::types::TaxonomyNode;

/// In-memory [`TaxonomyStore`] with programmable contents and failures.
#[derive(Default, Clone)]
pub struct MockTaxonomyStore {
    index: Arc<RwLock<Vec<TaxonomyNode>>>,
    branches: Arc<RwLock<HashMap<u64, Vec<TaxonomyNode>>>>,
    fail_index: Arc<AtomicBool>,
}

impl MockTaxonomyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the sub-category index.
    pub fn set_index(&self, nodes: Vec<TaxonomyNode>) {
        *self.index.write().expect("lock poisoned") = nodes;
    }

    /// Registers the descendant list for a sub-category id.
    pub fn insert_branch(&self, sub_category_id: u64, nodes: Vec<TaxonomyNode>) {
        self.branches
            .write()
            .expect("lock poisoned")
            .insert(sub_category_id, nodes);
    }

    /// Makes subsequent index loads fail with `IndexUnavailable`.
    pub fn fail_index(&self) {
        self.fail_index.store(true, Ordering::SeqCst);
    }
}

impl TaxonomyStore for MockTaxonomyStore {
    async fn load_subcategory_index(&self) -> TaxonomyResult<Vec<TaxonomyNode>> {
        if self.fail_index.load(Ordering::SeqCst) {
            return Err(TaxonomyError::IndexUnavailable {
                path: PathBuf::from("<mock>"),
                reason: "programmed failure".to_string(),
            });
        }

        Ok(self.index.read().expect("lock poisoned").clone())
    }

    async fn load_descendants(&self, sub_category_id: u64) -> TaxonomyResult<Vec<TaxonomyNode>> {
        self.branches
            .read()
            .expect("lock poisoned")
            .get(&sub_category_id)
            .cloned()
            .ok_or(TaxonomyError::BranchNotFound {
                id: sub_category_id,
            })
    }
}
