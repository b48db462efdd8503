use futures_util::future::join_all;
use tracing::{debug, info, instrument, warn};

use crate::classifier::{Classifier, SubCategoryGuess};
use crate::embedding::Embedder;
use crate::scoring::{
    Candidate, dedup_candidates, rank_branch_candidates, rank_candidates, sort_and_truncate,
};
use crate::taxonomy::TaxonomyStore;

use super::config::ResolverConfig;
use super::error::{ResolveError, ResolveResult};
use super::types::ResolvedCategory;

/// The hierarchical resolution funnel over a classifier, an embedder and a
/// taxonomy store.
pub struct Resolver<C: Classifier, E: Embedder, S: TaxonomyStore> {
    classifier: C,
    embedder: E,
    store: S,
    config: ResolverConfig,
}

impl<C: Classifier, E: Embedder, S: TaxonomyStore> std::fmt::Debug for Resolver<C, E, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<C: Classifier, E: Embedder, S: TaxonomyStore> Resolver<C, E, S> {
    pub fn new(classifier: C, embedder: E, store: S, config: ResolverConfig) -> ResolveResult<Self> {
        config.validate()?;

        Ok(Self {
            classifier,
            embedder,
            store,
            config,
        })
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolves `text` to at most `top_results` taxonomy nodes.
    ///
    /// Returns `Ok(vec![])` when the funnel legitimately finds nothing
    /// (empty index, all branches empty or missing); every other shortfall
    /// is a typed error.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn resolve(&self, text: &str) -> ResolveResult<Vec<ResolvedCategory>> {
        match self.config.deadline {
            Some(deadline) => tokio::time::timeout(deadline, self.resolve_inner(text))
                .await
                .map_err(|_| ResolveError::DeadlineExceeded { deadline })?,
            None => self.resolve_inner(text).await,
        }
    }

    async fn resolve_inner(&self, text: &str) -> ResolveResult<Vec<ResolvedCategory>> {
        // Stage 1: one classifier call proposes the working guesses.
        let guess = self.classifier.classify(text).await?;

        let working_guesses: Vec<SubCategoryGuess> = if self.config.consider_all_branches {
            guess
                .all_sub_categories()
                .filter(|g| g.is_usable())
                .cloned()
                .collect()
        } else {
            guess
                .first_sub_category()
                .filter(|g| g.is_usable())
                .cloned()
                .into_iter()
                .collect()
        };

        if working_guesses.is_empty() {
            return Err(ResolveError::EmptyGuess);
        }

        info!(
            guesses = working_guesses.len(),
            first = %working_guesses[0].name,
            "Classifier proposed working guesses"
        );

        // Stage 2: rank the sub-category index against each guessed
        // description. The index load is fatal on failure; an empty index
        // just yields an empty resolution.
        let index = self.store.load_subcategory_index().await?;
        if index.is_empty() {
            warn!("Sub-category index is empty; resolution yields no candidates");
            return Ok(Vec::new());
        }

        let mut branches: Vec<(SubCategoryGuess, Candidate)> = Vec::new();
        for working in &working_guesses {
            let guess_embedding = self.embedder.embed(&working.description).await?;
            let survivors = rank_candidates(
                &guess_embedding,
                &working.name,
                index.clone(),
                self.config.top_subcategories,
            );

            debug!(
                guess = %working.name,
                survivors = survivors.len(),
                "Sub-category ranking complete"
            );

            for candidate in survivors {
                branches.push((working.clone(), candidate));
            }
        }

        if branches.is_empty() {
            warn!("No sub-category candidates survived ranking");
            return Ok(Vec::new());
        }

        // Stage 3: embed the original input once, then expand every branch
        // concurrently. Each branch scores into its own list; completion
        // order is irrelevant because stage 4 re-sorts.
        let input_embedding = self.embedder.embed(text).await?;

        let expansions = branches
            .iter()
            .map(|(working, candidate)| self.expand_branch(working, candidate, &input_embedding));
        let branch_results = join_all(expansions).await;

        let aggregated: Vec<Candidate> = branch_results.into_iter().flatten().collect();

        if aggregated.is_empty() {
            warn!("All branches produced zero leaf candidates");
            return Ok(Vec::new());
        }

        // Stage 4: dedup across branches (first occurrence wins), then the
        // authoritative sort and truncation.
        let unique = dedup_candidates(aggregated);
        let top = sort_and_truncate(unique, self.config.top_results);

        info!(results = top.len(), "Resolution complete");

        Ok(top
            .into_iter()
            .map(ResolvedCategory::from_candidate)
            .collect())
    }

    /// Loads and ranks one branch. Never fails: a missing, corrupt, or
    /// empty branch contributes zero candidates.
    async fn expand_branch(
        &self,
        working: &SubCategoryGuess,
        sub_category: &Candidate,
        input_embedding: &[f32],
    ) -> Vec<Candidate> {
        let nodes = match self.store.load_descendants(sub_category.id()).await {
            Ok(nodes) => nodes,
            Err(e) => {
                warn!(
                    sub_category_id = sub_category.id(),
                    sub_category = %sub_category.name(),
                    error = %e,
                    "Skipping branch: descendants unavailable"
                );
                return Vec::new();
            }
        };

        if nodes.is_empty() {
            warn!(
                sub_category_id = sub_category.id(),
                sub_category = %sub_category.name(),
                "Branch has no descendants"
            );
            return Vec::new();
        }

        let leaves = rank_branch_candidates(
            input_embedding,
            &working.name,
            nodes,
            self.config.top_leaves_per_branch,
        );

        debug!(
            sub_category_id = sub_category.id(),
            leaves = leaves.len(),
            "Branch expansion complete"
        );

        leaves
    }
}
