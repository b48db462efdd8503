use std::time::Duration;

use crate::constants::{
    DEFAULT_TOP_LEAVES_PER_BRANCH, DEFAULT_TOP_RESULTS, DEFAULT_TOP_SUBCATEGORIES,
};

use super::error::{ResolveError, ResolveResult};

/// Per-resolution tuning knobs.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Sub-category candidates surviving the index ranking stage (N).
    pub top_subcategories: usize,

    /// Leaf candidates kept per branch (M).
    pub top_leaves_per_branch: usize,

    /// Records in the final answer (K).
    pub top_results: usize,

    /// Feed every classifier-proposed (top, sub) pair into the funnel
    /// instead of only the first. Widens recall at the cost of extra
    /// embedding calls and branch loads.
    pub consider_all_branches: bool,

    /// Overall wall-clock bound for one resolution. When it elapses,
    /// in-flight branch work is aborted and the resolution fails rather
    /// than returning a silently partial top-K.
    pub deadline: Option<Duration>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            top_subcategories: DEFAULT_TOP_SUBCATEGORIES,
            top_leaves_per_branch: DEFAULT_TOP_LEAVES_PER_BRANCH,
            top_results: DEFAULT_TOP_RESULTS,
            consider_all_branches: false,
            deadline: None,
        }
    }
}

impl ResolverConfig {
    pub fn top_subcategories(mut self, n: usize) -> Self {
        self.top_subcategories = n;
        self
    }

    pub fn top_leaves_per_branch(mut self, m: usize) -> Self {
        self.top_leaves_per_branch = m;
        self
    }

    pub fn top_results(mut self, k: usize) -> Self {
        self.top_results = k;
        self
    }

    pub fn consider_all_branches(mut self, enabled: bool) -> Self {
        self.consider_all_branches = enabled;
        self
    }

    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn validate(&self) -> ResolveResult<()> {
        if self.top_subcategories == 0 {
            return Err(ResolveError::InvalidConfig {
                reason: "top_subcategories must be > 0".to_string(),
            });
        }
        if self.top_leaves_per_branch == 0 {
            return Err(ResolveError::InvalidConfig {
                reason: "top_leaves_per_branch must be > 0".to_string(),
            });
        }
        if self.top_results == 0 {
            return Err(ResolveError::InvalidConfig {
                reason: "top_results must be > 0".to_string(),
            });
        }
        Ok(())
    }
}
