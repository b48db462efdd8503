use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::constants::DEFAULT_REQUEST_TIMEOUT_SECS;

use super::Classifier;
use super::error::{ClassifierError, ClassifierResult};
use super::types::{BranchGuess, TopCategoryGuess};

/// Prompt sent to the generate endpoint. The model must answer with the
/// exact JSON array shape the funnel parses.
const PROMPT_TEMPLATE: &str = r#"From the text below, infer the matching main category and sub-category, and write a short description for the sub-category.
Answer with exactly this JSON array shape, listing the main category and its sub-categories (each with a description):
[
  {
    "categoryname": "(main category name)",
    "sub-category": [
      {
        "categoryname": "(sub-category name)",
        "description": "(sub-category description)"
      }
    ]
  }
]
Text:
{user_text}
"#;

const TEMPERATURE: f32 = 0.2;
const MAX_TOKENS: u32 = 512;

/// Connection settings for the generative classifier endpoint.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub url: String,
    pub model: String,
    pub timeout: Duration,
}

impl ClassifierConfig {
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

/// HTTP client for an Ollama-style generate endpoint.
#[derive(Debug, Clone)]
pub struct GenerativeClassifier {
    client: Client,
    config: ClassifierConfig,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

impl GenerativeClassifier {
    pub fn new(config: ClassifierConfig) -> ClassifierResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClassifierError::ClientBuild {
                reason: e.to_string(),
            })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }
}

#[async_trait]
impl Classifier for GenerativeClassifier {
    async fn classify(&self, text: &str) -> ClassifierResult<BranchGuess> {
        let prompt = PROMPT_TEMPLATE.replace("{user_text}", text);
        let body = GenerateRequest {
            model: &self.config.model,
            prompt: &prompt,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            stream: false,
        };

        let response = self
            .client
            .post(&self.config.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClassifierError::RequestFailed {
                url: self.config.url.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        let raw = response
            .text()
            .await
            .map_err(|e| ClassifierError::RequestFailed {
                url: self.config.url.clone(),
                reason: e.to_string(),
            })?;

        if !status.is_success() {
            return Err(ClassifierError::HttpStatus {
                status: status.as_u16(),
                body: raw,
            });
        }

        debug!(response_len = raw.len(), "Classifier raw response received");
        parse_branch_guess(&raw)
    }
}

/// Parses the endpoint's answer into a [`BranchGuess`].
///
/// Accepts either the bare JSON array or an envelope object whose
/// `response` field holds the array as a string (the generate endpoint's
/// non-streaming shape). Anything else is a hard failure.
pub(super) fn parse_branch_guess(raw: &str) -> ClassifierResult<BranchGuess> {
    let value: Value =
        serde_json::from_str(raw.trim()).map_err(|e| ClassifierError::MalformedResponse {
            reason: e.to_string(),
        })?;

    let envelope = value
        .as_object()
        .and_then(|map| map.get("response"))
        .cloned();

    let top_categories: Vec<TopCategoryGuess> = match envelope {
        Some(Value::String(inner)) => {
            serde_json::from_str(inner.trim()).map_err(|e| ClassifierError::MalformedResponse {
                reason: e.to_string(),
            })?
        }
        Some(_) => {
            return Err(ClassifierError::MalformedResponse {
                reason: "envelope `response` field is not a string".to_string(),
            });
        }
        None => serde_json::from_value(value).map_err(|e| ClassifierError::MalformedResponse {
            reason: e.to_string(),
        })?,
    };

    Ok(BranchGuess { top_categories })
}
