//! Error-explanation flow
//!
//! Given a failing document and its parser message, the model explains the
//! syntax error and proposes a replacement text. The suggested fix is not
//! guaranteed to be valid JSON; applying it goes through normal
//! re-validation.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::Result;
use crate::service::ModelService;

const FLOW: &str = "explain-json-error";

const SYSTEM_PROMPT: &str = "You are a helpful assistant that explains JSON syntax errors \
and suggests fixes. Be concise and use technical terms. Respond with a JSON object with \
exactly two string fields: \"explanation\" (explanation of the error) and \"suggested_fix\" \
(the corrected JSON text).";

/// Input to the explain flow
#[derive(Debug, Clone, Serialize)]
pub struct ExplainErrorInput {
    /// The JSON string to validate and explain errors for
    pub json_string: String,
    /// The error message associated with the JSON string
    pub error_message: String,
}

/// Explanation and suggested replacement text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainErrorOutput {
    pub explanation: String,
    pub suggested_fix: String,
}

fn response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "explanation": { "type": "string" },
            "suggested_fix": { "type": "string" }
        },
        "required": ["explanation", "suggested_fix"]
    })
}

fn render_user(input: &ExplainErrorInput) -> String {
    format!(
        "The JSON string is: {}\nThe error message is: {}\nExplain the error and suggest a fix.",
        input.json_string, input.error_message
    )
}

/// Ask the model service to explain a JSON syntax error
pub async fn explain_json_error<S: ModelService>(
    service: &S,
    input: &ExplainErrorInput,
) -> Result<ExplainErrorOutput> {
    super::run_flow(
        service,
        FLOW,
        SYSTEM_PROMPT,
        render_user(input),
        &response_schema(),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::service::testing::{FailingService, StaticService};

    fn input() -> ExplainErrorInput {
        ExplainErrorInput {
            json_string: "{\"a\": }".to_string(),
            error_message: "expected value at line 1 column 7".to_string(),
        }
    }

    #[tokio::test]
    async fn test_explain_returns_typed_output() {
        let service = StaticService {
            response: json!({
                "explanation": "A value is missing after the colon.",
                "suggested_fix": "{\"a\": null}"
            }),
        };
        let output = explain_json_error(&service, &input()).await.unwrap();
        assert_eq!(output.suggested_fix, "{\"a\": null}");
        assert!(output.explanation.contains("missing"));
    }

    #[tokio::test]
    async fn test_explain_rejects_malformed_response() {
        let service = StaticService {
            response: json!({ "explanation": "only half an answer" }),
        };
        let err = explain_json_error(&service, &input()).await.unwrap_err();
        assert!(matches!(err, Error::SchemaValidation { .. }));
    }

    #[tokio::test]
    async fn test_explain_propagates_service_failure() {
        let err = explain_json_error(&FailingService, &input())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Service { .. }));
    }

    #[test]
    fn test_prompt_carries_text_and_message() {
        let user = render_user(&input());
        assert!(user.contains("{\"a\": }"));
        assert!(user.contains("line 1 column 7"));
    }
}
