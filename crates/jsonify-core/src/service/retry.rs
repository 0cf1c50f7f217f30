//! Retry logic with exponential backoff for model-service requests
//!
//! Retries transient failures only; client and authentication errors fail
//! immediately.

use std::time::Duration;

use backoff::backoff::Backoff;
use backoff::ExponentialBackoff;

use crate::service::error::ServiceError;

/// Retry policy configuration
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts
    pub max_attempts: u32,
    /// Base delay for exponential backoff (in seconds)
    pub base_delay_secs: u64,
    /// Maximum delay between retries (in seconds)
    pub max_delay_secs: u64,
    /// Whether to add jitter to prevent thundering herd
    pub jitter: bool,
    /// Multiplier for exponential backoff
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 1,
            max_delay_secs: 30,
            jitter: true,
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Create a new retry policy with custom attempt count
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Default::default()
        }
    }

    /// Disable retries entirely
    pub fn none() -> Self {
        Self::new(0)
    }

    fn create_backoff(&self) -> ExponentialBackoff {
        let mut backoff = ExponentialBackoff {
            initial_interval: Duration::from_secs(self.base_delay_secs),
            max_interval: Duration::from_secs(self.max_delay_secs),
            multiplier: self.multiplier,
            max_elapsed_time: None, // max attempts are enforced separately
            ..Default::default()
        };
        if !self.jitter {
            backoff.randomization_factor = 0.0;
        }
        backoff
    }
}

/// Decision on whether to retry a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Retry the request after the specified delay
    Retry { delay: Duration },
    /// Do not retry the request
    NoRetry,
}

/// Retry state for one logical request
#[derive(Debug)]
pub struct RetryHandler {
    policy: RetryPolicy,
    attempts: u32,
    backoff: ExponentialBackoff,
}

impl RetryHandler {
    pub fn new(policy: RetryPolicy) -> Self {
        let backoff = policy.create_backoff();
        Self {
            policy,
            attempts: 0,
            backoff,
        }
    }

    /// Determine if a request should be retried based on the error
    pub fn should_retry(&mut self, error: &ServiceError) -> RetryDecision {
        if self.attempts >= self.policy.max_attempts {
            return RetryDecision::NoRetry;
        }
        if !error.should_retry() {
            return RetryDecision::NoRetry;
        }

        self.attempts += 1;
        let delay = self.calculate_delay(error);
        RetryDecision::Retry { delay }
    }

    fn calculate_delay(&mut self, error: &ServiceError) -> Duration {
        // A server-provided Retry-After takes precedence
        if let Some(retry_after_secs) = error.retry_delay() {
            return Duration::from_secs(retry_after_secs);
        }
        self.backoff
            .next_backoff()
            .unwrap_or(Duration::from_secs(self.policy.max_delay_secs))
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

/// Execute a request with retry logic
pub async fn execute_with_retry<F, Fut, T>(
    mut request_fn: F,
    policy: RetryPolicy,
) -> Result<T, ServiceError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, ServiceError>>,
{
    let mut handler = RetryHandler::new(policy);

    loop {
        match request_fn().await {
            Ok(response) => return Ok(response),
            Err(error) => match handler.should_retry(&error) {
                RetryDecision::Retry { delay } => {
                    log::warn!(
                        "Service request failed (attempt {}), retrying after {:?}: {}",
                        handler.attempts(),
                        delay,
                        error
                    );
                    tokio::time::sleep(delay).await;
                }
                RetryDecision::NoRetry => {
                    log::error!(
                        "Service request failed after {} attempts, not retrying: {}",
                        handler.attempts(),
                        error
                    );
                    return Err(error);
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::error::ErrorClassification;

    fn server_error() -> ServiceError {
        ServiceError {
            status_code: Some(500),
            classification: ErrorClassification::ServerError,
            message: "Server error".to_string(),
            details: None,
            retry_after: None,
        }
    }

    #[test]
    fn test_default_retry_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.base_delay_secs, 1);
        assert_eq!(policy.max_delay_secs, 30);
        assert!(policy.jitter);
    }

    #[test]
    fn test_retry_handler_max_attempts() {
        let mut handler = RetryHandler::new(RetryPolicy::new(2));
        let error = server_error();

        assert!(matches!(
            handler.should_retry(&error),
            RetryDecision::Retry { .. }
        ));
        assert!(matches!(
            handler.should_retry(&error),
            RetryDecision::Retry { .. }
        ));
        assert_eq!(handler.should_retry(&error), RetryDecision::NoRetry);
    }

    #[test]
    fn test_non_retryable_errors() {
        let mut handler = RetryHandler::new(RetryPolicy::default());
        let client_error = ServiceError {
            status_code: Some(400),
            classification: ErrorClassification::ClientError,
            message: "Bad request".to_string(),
            details: None,
            retry_after: None,
        };
        assert_eq!(handler.should_retry(&client_error), RetryDecision::NoRetry);
    }

    #[test]
    fn test_retry_after_header_takes_precedence() {
        let mut handler = RetryHandler::new(RetryPolicy::default());
        let error = ServiceError {
            status_code: Some(429),
            classification: ErrorClassification::RateLimitError,
            message: "Rate limited".to_string(),
            details: None,
            retry_after: Some(10),
        };

        match handler.should_retry(&error) {
            RetryDecision::Retry { delay } => assert_eq!(delay.as_secs(), 10),
            RetryDecision::NoRetry => panic!("expected retry decision"),
        }
    }

    #[tokio::test]
    async fn test_execute_with_retry_gives_up() {
        let mut calls = 0u32;
        let result: Result<(), ServiceError> = execute_with_retry(
            || {
                calls += 1;
                async { Err(server_error()) }
            },
            RetryPolicy {
                max_attempts: 2,
                base_delay_secs: 0,
                max_delay_secs: 0,
                jitter: false,
                multiplier: 1.0,
            },
        )
        .await;
        assert!(result.is_err());
        assert_eq!(calls, 3); // initial attempt + two retries
    }

    #[tokio::test]
    async fn test_execute_with_retry_succeeds_eventually() {
        let mut calls = 0u32;
        let result = execute_with_retry(
            || {
                calls += 1;
                let attempt = calls;
                async move {
                    if attempt < 2 {
                        Err(server_error())
                    } else {
                        Ok("ok")
                    }
                }
            },
            RetryPolicy {
                max_attempts: 3,
                base_delay_secs: 0,
                max_delay_secs: 0,
                jitter: false,
                multiplier: 1.0,
            },
        )
        .await;
        assert_eq!(result.unwrap(), "ok");
        assert_eq!(calls, 2);
    }
}
