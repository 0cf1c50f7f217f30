//! HTTP client for the external model service
//!
//! Speaks an OpenAI-style chat-completions dialect: the flow's prompt goes
//! out as system+user messages with a JSON response format, and the reply's
//! message content is parsed back into the structured object the flow
//! expects. Authentication is a bearer token taken from the environment or
//! the configuration.

use reqwest::Client as ReqwestClient;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::service::retry::{execute_with_retry, RetryPolicy};
use crate::service::{ModelService, PromptRequest, ServiceError};

/// Environment variable holding the service API key
pub const API_KEY_ENV: &str = "JSONIFY_API_KEY";

/// Configuration for the model service client
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base URL of the chat-completions endpoint
    pub base_url: String,
    /// Model identifier to request
    pub model: String,
    /// API key; falls back to `JSONIFY_API_KEY`
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Retry policy for failed requests
    pub retry: RetryPolicy,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            timeout_secs: 30,
            retry: RetryPolicy::default(),
        }
    }
}

impl ServiceConfig {
    /// Resolve the API key from the config or the environment
    fn resolve_api_key(&self) -> Result<String> {
        if let Some(key) = &self.api_key {
            return Ok(key.clone());
        }
        std::env::var(API_KEY_ENV).map_err(|_| Error::Configuration {
            message: format!(
                "Model service API key not found. Set the {} environment variable",
                API_KEY_ENV
            ),
            source: None,
        })
    }
}

/// Model service client over HTTP
pub struct HttpModelService {
    client: ReqwestClient,
    config: ServiceConfig,
    endpoint: url::Url,
}

impl HttpModelService {
    /// Create a new client, validating the configured base URL
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let endpoint = url::Url::parse(&format!(
            "{}/chat/completions",
            config.base_url.trim_end_matches('/')
        ))
        .map_err(|e| Error::Configuration {
            message: format!("Invalid service base URL '{}': {}", config.base_url, e),
            source: None,
        })?;

        let client = ReqwestClient::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Configuration {
                message: format!("Failed to create HTTP client: {}", e),
                source: Some(anyhow::anyhow!(e)),
            })?;

        Ok(Self {
            client,
            config,
            endpoint,
        })
    }

    /// Single request attempt; retry decisions happen in the caller
    async fn execute(&self, api_key: &str, body: &Value) -> std::result::Result<Value, ServiceError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await
            .map_err(ServiceError::from_request_error)?;

        if !response.status().is_success() {
            return Err(ServiceError::from_response(response).await);
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ServiceError::protocol(format!("Failed to parse response as JSON: {}", e)))
    }

    /// Pull the structured object out of the chat-completions envelope
    fn extract_content(envelope: &Value) -> Result<Value> {
        let content = envelope
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .ok_or_else(|| Error::schema("Service response has no message content"))?;

        serde_json::from_str::<Value>(content).map_err(|e| Error::SchemaValidation {
            message: format!("Service response content is not valid JSON: {}", e),
            source: Some(anyhow::anyhow!(content.to_string())),
        })
    }
}

impl ModelService for HttpModelService {
    async fn complete(&self, request: PromptRequest) -> Result<Value> {
        let api_key = self.config.resolve_api_key()?;
        let request_id = Uuid::new_v4();
        let started = std::time::Instant::now();

        let body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.user }
            ],
            "response_format": { "type": "json_object" },
            "temperature": 0.2
        });

        debug!(
            flow = %request.flow,
            request_id = %request_id,
            started_at = %chrono::Utc::now().to_rfc3339(),
            "Dispatching model service request"
        );

        let envelope = execute_with_retry(
            || self.execute(&api_key, &body),
            self.config.retry.clone(),
        )
        .await
        .map_err(Error::from)?;

        debug!(
            flow = %request.flow,
            request_id = %request_id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Model service request completed"
        );

        Self::extract_content(&envelope)
    }
}
