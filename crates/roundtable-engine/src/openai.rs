// Minimal OpenAI chat-completions client
//
// Request/response types cover exactly what the turn loop needs: role,
// content, model, seed. No streaming, no tool calls.

use roundtable_core::model_config::ModelEndpoint;
use roundtable_core::{EngineError, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Message role in the provider protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One message in a completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    seed: i64,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Thin reqwest wrapper around POST /chat/completions
#[derive(Clone, Default)]
pub struct ChatClient {
    client: reqwest::Client,
}

impl ChatClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Run one completion against an endpoint and return the reply text
    pub async fn complete(
        &self,
        endpoint: &ModelEndpoint,
        seed: i64,
        messages: &[ChatMessage],
    ) -> Result<String> {
        let base = endpoint
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/');
        let url = format!("{}/chat/completions", base);

        let request = ChatRequest {
            model: &endpoint.model,
            messages,
            seed,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&endpoint.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| EngineError::provider(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::provider(format!(
                "{} returned {}: {}",
                url, status, body
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| EngineError::provider(format!("malformed response from {}: {}", url, e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| EngineError::provider(format!("{} returned no completion", url)))
    }
}
