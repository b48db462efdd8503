use serde::{Deserialize, Serialize};

/// Structured output of one classifier call: an ordered list of proposed
/// top categories, each carrying proposed sub-categories.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BranchGuess {
    pub top_categories: Vec<TopCategoryGuess>,
}

impl BranchGuess {
    /// The first sub-category of the first top category, the funnel's
    /// default entry point.
    pub fn first_sub_category(&self) -> Option<&SubCategoryGuess> {
        self.top_categories
            .first()
            .and_then(|top| top.sub_categories.first())
    }

    /// Every proposed sub-category, in proposal order across all top
    /// categories.
    pub fn all_sub_categories(&self) -> impl Iterator<Item = &SubCategoryGuess> {
        self.top_categories
            .iter()
            .flat_map(|top| top.sub_categories.iter())
    }
}

/// One proposed top category with its sub-category guesses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCategoryGuess {
    #[serde(rename = "categoryname")]
    pub name: String,

    #[serde(rename = "sub-category", default)]
    pub sub_categories: Vec<SubCategoryGuess>,
}

/// One proposed sub-category: a name plus a generated description. The
/// description is what gets embedded for index ranking; the name drives the
/// exact-match override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubCategoryGuess {
    #[serde(rename = "categoryname")]
    pub name: String,

    #[serde(default)]
    pub description: String,
}

impl SubCategoryGuess {
    /// A guess is usable only with both a name and a description.
    pub fn is_usable(&self) -> bool {
        !self.name.trim().is_empty() && !self.description.trim().is_empty()
    }
}
