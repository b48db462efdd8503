//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `RUBRIC_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::classifier::ClassifierConfig;
use crate::constants::DEFAULT_REQUEST_TIMEOUT_SECS;
use crate::embedding::EmbedderConfig;

/// Default generate endpoint used when `RUBRIC_GENERATE_URL` is not set.
pub const DEFAULT_GENERATE_URL: &str = "http://localhost:11434/api/generate";

/// Default embed endpoint used when `RUBRIC_EMBED_URL` is not set.
pub const DEFAULT_EMBED_URL: &str = "http://localhost:11434/api/embed";

/// Default generative model identifier.
pub const DEFAULT_GENERATE_MODEL: &str = "llama3.3:latest";

/// Default embedding model identifier.
pub const DEFAULT_EMBED_MODEL: &str = "kun432/cl-nagoya-ruri-large:latest";

/// Process configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `RUBRIC_*` overrides on top of defaults.
/// Endpoints and model identifiers are handed to the client constructors as
/// explicit configuration; nothing reads process-wide state after startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Generative classifier endpoint URL. Default: local Ollama generate.
    pub generate_url: String,

    /// Model identifier sent with classifier requests.
    pub generate_model: String,

    /// Embedding endpoint URL. Default: local Ollama embed.
    pub embed_url: String,

    /// Model identifier sent with embedding requests.
    pub embed_model: String,

    /// Directory holding the sub-category index and branch files.
    /// Default: `./embeddings`.
    pub taxonomy_path: PathBuf,

    /// Per-request timeout for external calls, in seconds. Default: `30`.
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            generate_url: DEFAULT_GENERATE_URL.to_string(),
            generate_model: DEFAULT_GENERATE_MODEL.to_string(),
            embed_url: DEFAULT_EMBED_URL.to_string(),
            embed_model: DEFAULT_EMBED_MODEL.to_string(),
            taxonomy_path: PathBuf::from("./embeddings"),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    const ENV_GENERATE_URL: &'static str = "RUBRIC_GENERATE_URL";
    const ENV_GENERATE_MODEL: &'static str = "RUBRIC_GENERATE_MODEL";
    const ENV_EMBED_URL: &'static str = "RUBRIC_EMBED_URL";
    const ENV_EMBED_MODEL: &'static str = "RUBRIC_EMBED_MODEL";
    const ENV_TAXONOMY_PATH: &'static str = "RUBRIC_TAXONOMY_PATH";
    const ENV_REQUEST_TIMEOUT_SECS: &'static str = "RUBRIC_REQUEST_TIMEOUT_SECS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let generate_url =
            Self::parse_string_from_env(Self::ENV_GENERATE_URL, defaults.generate_url);
        let generate_model =
            Self::parse_string_from_env(Self::ENV_GENERATE_MODEL, defaults.generate_model);
        let embed_url = Self::parse_string_from_env(Self::ENV_EMBED_URL, defaults.embed_url);
        let embed_model = Self::parse_string_from_env(Self::ENV_EMBED_MODEL, defaults.embed_model);
        let taxonomy_path =
            Self::parse_path_from_env(Self::ENV_TAXONOMY_PATH, defaults.taxonomy_path);
        let request_timeout_secs =
            Self::parse_timeout_from_env(defaults.request_timeout_secs)?;

        Ok(Self {
            generate_url,
            generate_model,
            embed_url,
            embed_model,
            taxonomy_path,
            request_timeout_secs,
        })
    }

    /// Validates paths and basic invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.taxonomy_path.exists() && !self.taxonomy_path.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.taxonomy_path.clone(),
            });
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                value: self.request_timeout_secs.to_string(),
            });
        }

        Ok(())
    }

    /// Per-request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Connection settings for the generative classifier client.
    pub fn classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig::new(&self.generate_url, &self.generate_model)
            .timeout(self.request_timeout())
    }

    /// Connection settings for the embedding client.
    pub fn embedder_config(&self) -> EmbedderConfig {
        EmbedderConfig::new(&self.embed_url, &self.embed_model).timeout(self.request_timeout())
    }

    fn parse_timeout_from_env(default: u64) -> Result<u64, ConfigError> {
        match env::var(Self::ENV_REQUEST_TIMEOUT_SECS) {
            Ok(value) => {
                let secs: u64 = value.parse().map_err(|e| ConfigError::TimeoutParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if secs == 0 {
                    return Err(ConfigError::InvalidTimeout { value });
                }

                Ok(secs)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }
}
