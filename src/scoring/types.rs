use crate::taxonomy::TaxonomyNode;

/// A taxonomy node annotated with its similarity to the current query.
/// Ephemeral: produced during ranking, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub node: TaxonomyNode,
    pub similarity: f32,
    /// Set when the score came from the exact-match override. String
    /// equality is ground truth, so it also wins similarity ties against
    /// embedding-derived scores.
    pub exact: bool,
}

impl Candidate {
    pub fn new(node: TaxonomyNode, similarity: f32) -> Self {
        Self {
            node,
            similarity,
            exact: false,
        }
    }

    /// Candidate carrying the exact-match override score.
    pub fn exact(node: TaxonomyNode) -> Self {
        Self {
            node,
            similarity: crate::constants::EXACT_MATCH_SIMILARITY,
            exact: true,
        }
    }

    pub fn id(&self) -> u64 {
        self.node.id
    }

    pub fn name(&self) -> &str {
        &self.node.name
    }
}
