//! HTTP client for a completion-style model service.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use super::{LanguageModel, ModelResponse};

/// Client for a remote completion endpoint.
///
/// Posts the prompt to `{base_url}/v1/completions` and accepts either a
/// bare JSON string or a structured message object in response.
pub struct HttpModelClient {
    client: Client,
    base_url: String,
    model: Option<String>,
}

/// Request payload for a completion.
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    prompt: &'a str,
}

impl HttpModelClient {
    /// Create a new model client.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: None,
        }
    }

    /// Set the model identifier forwarded with every request.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Check if the model service is healthy.
    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);

        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }
}

#[async_trait]
impl LanguageModel for HttpModelClient {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn invoke(&self, prompt: &str) -> Result<ModelResponse> {
        let url = format!("{}/v1/completions", self.base_url);
        let request = CompletionRequest {
            model: self.model.as_deref(),
            prompt,
        };

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("model service returned {}: {}", status, text));
        }

        let body: Value = response.json().await?;
        match body {
            Value::String(text) => Ok(ModelResponse::Text(text)),
            other => Ok(ModelResponse::Structured(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpModelClient::new("http://localhost:3018/");
        assert_eq!(client.base_url, "http://localhost:3018");
        assert!(client.model.is_none());
    }

    #[test]
    fn test_model_config() {
        let client = HttpModelClient::new("http://localhost:3018").with_model("claude-sonnet");
        assert_eq!(client.model.as_deref(), Some("claude-sonnet"));
    }
}
