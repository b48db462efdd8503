use serde::{Deserialize, Serialize};

/// One node of the static taxonomy, as stored in the JSONL corpus.
///
/// `id` is unique across the whole taxonomy and is the only key used to
/// address storage; the name is a display label. Index records may omit the
/// description; descendant records carry one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyNode {
    pub id: u64,

    #[serde(rename = "categoryname")]
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub embedding: Vec<f32>,

    /// Containing node, when the corpus records it. Lookup-only context;
    /// the resolver never follows it.
    #[serde(rename = "parentid", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
}

impl TaxonomyNode {
    /// Embedding dimension of this record.
    pub fn dimension(&self) -> usize {
        self.embedding.len()
    }
}
