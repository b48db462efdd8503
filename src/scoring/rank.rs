use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::{debug, warn};

use crate::taxonomy::TaxonomyNode;

use super::types::Candidate;

/// Cosine similarity between two vectors.
///
/// Zero-norm, empty, or length-mismatched inputs score 0.0 rather than
/// dividing by zero; callers that care about dimension integrity check it
/// before scoring.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) =
        a.iter()
            .zip(b.iter())
            .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (&av, &bv)| {
                (dot + av * bv, na + av * av, nb + bv * bv)
            });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Scores every node against `query` with the per-candidate exact-match
/// override: a node whose name equals `target_name` (trimmed) scores 1.0
/// without touching its embedding; everything else scores by cosine.
/// Nodes whose embedding dimension differs from the query are dropped with
/// a warning. Returns the top `top_k` in descending order.
pub fn rank_candidates(
    query: &[f32],
    target_name: &str,
    nodes: Vec<TaxonomyNode>,
    top_k: usize,
) -> Vec<Candidate> {
    let target = target_name.trim();

    let scored: Vec<Candidate> = nodes
        .into_iter()
        .filter_map(|node| {
            if node.name.trim() == target {
                return Some(Candidate::exact(node));
            }

            if node.dimension() != query.len() {
                warn!(
                    node_id = node.id,
                    expected_dim = query.len(),
                    actual_dim = node.dimension(),
                    "Dropping candidate: embedding dimension mismatch"
                );
                return None;
            }

            let similarity = cosine_similarity(query, &node.embedding);
            Some(Candidate::new(node, similarity))
        })
        .collect();

    sort_and_truncate(scored, top_k)
}

/// Branch variant of [`rank_candidates`] with the whole-list short-circuit:
/// if any node's name equals `guessed_name`, only those exact matches are
/// returned (similarity 1.0, truncated to `top_k`) and embedding scoring is
/// skipped for the entire list.
pub fn rank_branch_candidates(
    query: &[f32],
    guessed_name: &str,
    nodes: Vec<TaxonomyNode>,
    top_k: usize,
) -> Vec<Candidate> {
    let guessed = guessed_name.trim();

    let has_exact = nodes.iter().any(|node| node.name.trim() == guessed);
    if has_exact {
        debug!(guessed_name = guessed, "Exact leaf match; skipping embedding scoring for branch");
        let exact: Vec<Candidate> = nodes
            .into_iter()
            .filter(|node| node.name.trim() == guessed)
            .map(Candidate::exact)
            .collect();
        return sort_and_truncate(exact, top_k);
    }

    rank_candidates(query, guessed, nodes, top_k)
}

/// Stable sort descending by similarity, then truncate. An exact-match
/// candidate wins a similarity tie against an embedding-derived score;
/// remaining ties keep input order. This sort is the sole ordering
/// authority at every stage.
pub fn sort_and_truncate(mut candidates: Vec<Candidate>, top_k: usize) -> Vec<Candidate> {
    candidates.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.exact.cmp(&a.exact))
    });
    candidates.truncate(top_k);
    candidates
}

/// Removes duplicates by `(id, name, description)`; the first occurrence
/// wins.
pub fn dedup_candidates(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut seen: HashSet<(u64, String, String)> = HashSet::new();

    candidates
        .into_iter()
        .filter(|candidate| {
            seen.insert((
                candidate.node.id,
                candidate.node.name.clone(),
                candidate.node.description.clone(),
            ))
        })
        .collect()
}
