//! Programmable embedder for tests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::Embedder;
use super::error::{EmbedderError, EmbedderResult};

/// In-memory [`Embedder`] with a programmed text → vector table.
///
/// Unprogrammed texts fail, which doubles as the fatal-embedding-error
/// fixture in resolver tests.
#[derive(Default, Clone)]
pub struct MockEmbedder {
    vectors: Arc<RwLock<HashMap<String, Vec<f32>>>>,
}

impl MockEmbedder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Embedder pre-loaded with `(text, vector)` pairs.
    pub fn with_entries(entries: &[(&str, &[f32])]) -> Self {
        let mock = Self::new();
        for (text, vector) in entries {
            mock.insert(text, vector);
        }
        mock
    }

    pub fn insert(&self, text: &str, vector: &[f32]) {
        self.vectors
            .write()
            .expect("lock poisoned")
            .insert(text.to_string(), vector.to_vec());
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, text: &str) -> EmbedderResult<Vec<f32>> {
        self.vectors
            .read()
            .expect("lock poisoned")
            .get(text)
            .cloned()
            .ok_or_else(|| EmbedderError::MalformedResponse {
                reason: format!("no embedding programmed for '{text}'"),
            })
    }
}
