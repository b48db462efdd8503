use serde::{Serialize, Serializer};

use crate::constants::SIMILARITY_DISPLAY_DECIMALS;
use crate::scoring::Candidate;

/// One record of the final answer.
///
/// `similarity` keeps full precision in memory (sorting happens before this
/// type exists); serialization rounds it for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedCategory {
    pub id: u64,

    #[serde(rename = "categoryname")]
    pub name: String,

    pub description: String,

    #[serde(serialize_with = "round_for_display")]
    pub similarity: f32,
}

impl ResolvedCategory {
    pub(super) fn from_candidate(candidate: Candidate) -> Self {
        Self {
            id: candidate.node.id,
            name: candidate.node.name,
            description: candidate.node.description,
            similarity: candidate.similarity,
        }
    }

    /// The similarity as it is serialized.
    pub fn display_similarity(&self) -> f32 {
        round(self.similarity)
    }
}

fn round(value: f32) -> f32 {
    let factor = 10f32.powi(SIMILARITY_DISPLAY_DECIMALS);
    (value * factor).round() / factor
}

fn round_for_display<S>(value: &f32, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f32(round(*value))
}
