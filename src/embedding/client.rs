use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_REQUEST_TIMEOUT_SECS;

use super::Embedder;
use super::error::{EmbedderError, EmbedderResult};

/// Connection settings for the embedding endpoint.
#[derive(Debug, Clone)]
pub struct EmbedderConfig {
    pub url: String,
    pub model: String,
    pub timeout: Duration,
}

impl EmbedderConfig {
    pub fn new(url: &str, model: &str) -> Self {
        Self {
            url: url.to_string(),
            model: model.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP client for an Ollama-style embed endpoint.
#[derive(Debug, Clone)]
pub struct HttpEmbedder {
    client: Client,
    config: EmbedderConfig,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

impl HttpEmbedder {
    pub fn new(config: EmbedderConfig) -> EmbedderResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| EmbedderError::ClientBuild {
                reason: e.to_string(),
            })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &EmbedderConfig {
        &self.config
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, text: &str) -> EmbedderResult<Vec<f32>> {
        let body = EmbedRequest {
            model: &self.config.model,
            input: text,
        };

        let response = self
            .client
            .post(&self.config.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| EmbedderError::RequestFailed {
                url: self.config.url.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbedderError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: EmbedResponse =
            response
                .json()
                .await
                .map_err(|e| EmbedderError::MalformedResponse {
                    reason: e.to_string(),
                })?;

        first_embedding(parsed)
    }
}

/// The embed endpoint batches by design; a single-input request yields the
/// vector at index 0.
fn first_embedding(response: EmbedResponse) -> EmbedderResult<Vec<f32>> {
    response
        .embeddings
        .into_iter()
        .next()
        .ok_or_else(|| EmbedderError::MalformedResponse {
            reason: "response contained no embeddings".to_string(),
        })
}

#[cfg(test)]
pub(super) fn first_embedding_from_json(raw: &str) -> EmbedderResult<Vec<f32>> {
    let parsed: EmbedResponse =
        serde_json::from_str(raw).map_err(|e| EmbedderError::MalformedResponse {
            reason: e.to_string(),
        })?;
    first_embedding(parsed)
}
