//! Model-service flows
//!
//! A flow is the unit of delegation to the model service: a fixed prompt
//! template, typed input/output structs, and an embedded response schema.
//! Flows hold no state; the stateful adapters in [`crate::adapters`] decide
//! when to invoke them and what to do with the results.

pub mod convert;
pub mod explain;
pub mod secure;

pub use convert::{convert_format, ConvertFormatInput, ConvertFormatOutput, TargetFormat};
pub use explain::{explain_json_error, ExplainErrorInput, ExplainErrorOutput};
pub use secure::{secure_json, SecureJsonInput, SecurityScanResult};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;
use crate::service::{schema, ModelService, PromptRequest};

/// Send a rendered prompt, validate the reply against the flow's response
/// schema, then deserialize it into the flow's output type.
pub(crate) async fn run_flow<S, O>(
    service: &S,
    flow: &str,
    system: &str,
    user: String,
    response_schema: &Value,
) -> Result<O>
where
    S: ModelService,
    O: DeserializeOwned,
{
    let request = PromptRequest {
        flow: flow.to_string(),
        system: system.to_string(),
        user,
    };
    let response = service.complete(request).await?;
    schema::validate_response(flow, response_schema, &response)?;
    Ok(serde_json::from_value(response)?)
}
