//! External model service interface
//!
//! The model service is the single external collaborator: a prompt goes in,
//! a schema-validated structured object comes out. [`ModelService`] is the
//! seam the flow layer calls through; [`HttpModelService`] is the production
//! implementation, and tests substitute in-process mocks.

pub mod client;
pub mod error;
pub mod retry;
pub mod schema;

pub use client::{HttpModelService, ServiceConfig, API_KEY_ENV};
pub use error::{ErrorClassification, ServiceError};
pub use retry::RetryPolicy;

use serde_json::Value;
use std::future::Future;

use crate::error::Result;

/// A prompt ready to send: the flow name (for logging), the fixed system
/// instruction, and the rendered user message.
#[derive(Debug, Clone)]
pub struct PromptRequest {
    pub flow: String,
    pub system: String,
    pub user: String,
}

/// The one suspend point of the system: an asynchronous request/response
/// call to the external model service returning a structured JSON object.
pub trait ModelService: Send + Sync {
    fn complete(&self, request: PromptRequest) -> impl Future<Output = Result<Value>> + Send;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::error::Error;

    /// Returns a fixed response for every request
    pub struct StaticService {
        pub response: Value,
    }

    impl ModelService for StaticService {
        async fn complete(&self, _request: PromptRequest) -> Result<Value> {
            Ok(self.response.clone())
        }
    }

    /// Fails every request with a service error
    pub struct FailingService;

    impl ModelService for FailingService {
        async fn complete(&self, _request: PromptRequest) -> Result<Value> {
            Err(Error::service("service unavailable"))
        }
    }
}
