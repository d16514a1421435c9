// Model endpoint configuration
//
// Every agent shares one ModelConfig: an ordered list of OpenAI-protocol
// endpoints plus a fixed sampling seed. The config file is a JSON array of
// endpoint objects, the same shape the orchestration tooling this replaces
// consumed (`[{"model": "...", "api_key": "...", "base_url": "..."}]`).

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Seed forwarded to the model provider on every completion call.
/// Reproducibility is best-effort; see the provider's documentation.
pub const DEFAULT_SEED: i64 = 42;

/// One model provider endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelEndpoint {
    /// Model identifier (e.g. "gpt-4o-mini")
    pub model: String,

    /// API key sent as a bearer token
    pub api_key: String,

    /// Base URL of the OpenAI-protocol API.
    /// Defaults to the public OpenAI endpoint when absent.
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Endpoint list plus the fixed seed, shared by all agents
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Endpoints, tried in listed order; first success wins
    pub endpoints: Vec<ModelEndpoint>,

    /// Fixed sampling seed for reproducibility
    pub seed: i64,
}

impl ModelConfig {
    /// Create a configuration from an endpoint list with the default seed
    pub fn new(endpoints: Vec<ModelEndpoint>) -> Self {
        Self {
            endpoints,
            seed: DEFAULT_SEED,
        }
    }

    /// Override the sampling seed
    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }

    /// Load the endpoint list from a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            EngineError::config(format!(
                "failed to read model config {}: {}",
                path.display(),
                e
            ))
        })?;
        let endpoints: Vec<ModelEndpoint> = serde_json::from_str(&raw).map_err(|e| {
            EngineError::config(format!(
                "failed to parse model config {}: {}",
                path.display(),
                e
            ))
        })?;
        if endpoints.is_empty() {
            return Err(EngineError::config(format!(
                "model config {} contains no endpoints",
                path.display()
            )));
        }
        Ok(Self::new(endpoints))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn from_file_parses_endpoint_list() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"model": "gpt-4o-mini", "api_key": "sk-test"}},
                {{"model": "local", "api_key": "none", "base_url": "http://localhost:8080/v1"}}]"#
        )
        .unwrap();

        let config = ModelConfig::from_file(file.path()).unwrap();
        assert_eq!(config.endpoints.len(), 2);
        assert_eq!(config.endpoints[0].model, "gpt-4o-mini");
        assert_eq!(config.endpoints[0].base_url, None);
        assert_eq!(
            config.endpoints[1].base_url.as_deref(),
            Some("http://localhost:8080/v1")
        );
        assert_eq!(config.seed, DEFAULT_SEED);
    }

    #[test]
    fn from_file_rejects_missing_file() {
        let err = ModelConfig::from_file("/nonexistent/model_config.json").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn from_file_rejects_empty_endpoint_list() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[]").unwrap();

        let err = ModelConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }
}
