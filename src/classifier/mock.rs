//! Programmable classifier for tests.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::Classifier;
use super::error::{ClassifierError, ClassifierResult};
use super::types::{BranchGuess, SubCategoryGuess, TopCategoryGuess};

/// In-memory [`Classifier`] returning a programmed guess.
#[derive(Default, Clone)]
pub struct MockClassifier {
    guess: Arc<RwLock<Option<BranchGuess>>>,
}

impl MockClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifier that always returns `guess`.
    pub fn with_guess(guess: BranchGuess) -> Self {
        let mock = Self::new();
        mock.set_guess(guess);
        mock
    }

    /// Convenience single-branch classifier.
    pub fn returning(top: &str, sub: &str, description: &str) -> Self {
        Self::with_guess(BranchGuess {
            top_categories: vec![TopCategoryGuess {
                name: top.to_string(),
                sub_categories: vec![SubCategoryGuess {
                    name: sub.to_string(),
                    description: description.to_string(),
                }],
            }],
        })
    }

    pub fn set_guess(&self, guess: BranchGuess) {
        *self.guess.write().expect("lock poisoned") = Some(guess);
    }
}

#[async_trait]
impl Classifier for MockClassifier {
    async fn classify(&self, _text: &str) -> ClassifierResult<BranchGuess> {
        self.guess
            .read()
            .expect("lock poisoned")
            .clone()
            .ok_or_else(|| ClassifierError::MalformedResponse {
                reason: "no guess programmed".to_string(),
            })
    }
}
