//! Model-service error classification and normalization
//!
//! Normalizes provider error responses into a uniform error format so the
//! retry layer can decide what is worth retrying.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Classification of service errors for retry logic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorClassification {
    /// Client errors (4xx) - should not retry
    ClientError,
    /// Server errors (5xx) - should retry
    ServerError,
    /// Network errors - should retry
    NetworkError,
    /// Rate limiting - should retry with backoff
    RateLimitError,
    /// Authentication errors - should not retry
    AuthenticationError,
    /// Unknown errors - default to no retry
    Unknown,
}

impl ErrorClassification {
    /// Check if this error type should be retried
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorClassification::ServerError
                | ErrorClassification::NetworkError
                | ErrorClassification::RateLimitError
        )
    }
}

/// Normalized service error representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceError {
    /// HTTP status code if available
    pub status_code: Option<u16>,
    /// Error classification for retry logic
    pub classification: ErrorClassification,
    /// Human-readable error message
    pub message: String,
    /// Additional error details from the response body
    pub details: Option<Value>,
    /// Retry-After header value if present
    pub retry_after: Option<u64>,
}

impl ServiceError {
    /// Create from a reqwest Response with a non-success status
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let status_code = Some(status.as_u16());

        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok());

        let body = response.text().await.unwrap_or_default();
        let details = serde_json::from_str::<Value>(&body).ok();
        let message = Self::extract_message(&details, &body, status);

        Self {
            status_code,
            classification: Self::classify_status(status),
            message,
            details,
            retry_after,
        }
    }

    /// Create from a network/request error
    pub fn from_request_error(error: reqwest::Error) -> Self {
        let classification = if error.is_timeout() || error.is_connect() {
            ErrorClassification::NetworkError
        } else {
            ErrorClassification::Unknown
        };

        Self {
            status_code: None,
            classification,
            message: error.to_string(),
            details: None,
            retry_after: None,
        }
    }

    /// Create an unclassified protocol error (e.g. unexpected body shape)
    pub fn protocol(message: impl Into<String>) -> Self {
        Self {
            status_code: None,
            classification: ErrorClassification::Unknown,
            message: message.into(),
            details: None,
            retry_after: None,
        }
    }

    /// Whether the retry layer should attempt this request again
    pub fn should_retry(&self) -> bool {
        self.classification.is_retryable()
    }

    /// Server-requested retry delay in seconds, if any
    pub fn retry_delay(&self) -> Option<u64> {
        self.retry_after
    }

    fn classify_status(status: StatusCode) -> ErrorClassification {
        match status.as_u16() {
            401 | 403 => ErrorClassification::AuthenticationError,
            429 => ErrorClassification::RateLimitError,
            400..=499 => ErrorClassification::ClientError,
            500..=599 => ErrorClassification::ServerError,
            _ => ErrorClassification::Unknown,
        }
    }

    /// Pull a human-readable message out of a provider error body
    fn extract_message(details: &Option<Value>, body: &str, status: StatusCode) -> String {
        if let Some(json) = details {
            if let Some(message) = json
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
            {
                return message.to_string();
            }
        }
        if body.is_empty() {
            format!("Service returned {}", status)
        } else {
            body.chars().take(200).collect()
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "{} ({})", self.message, code),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<ServiceError> for crate::Error {
    fn from(err: ServiceError) -> Self {
        crate::Error::Service {
            message: err.to_string(),
            status_code: err.status_code,
            source: Some(anyhow::anyhow!("{:?}", err.classification)),
        }
    }
}
