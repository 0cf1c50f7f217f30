//! Secret-detection flow
//!
//! Detection of likely secrets is delegated to the model service; no local
//! heuristics exist here. The redacted text the service returns is
//! parse-checked and re-serialized at 2-space indentation on receipt, so a
//! redaction result can always be applied back to the document and yield a
//! valid state.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::service::ModelService;

const FLOW: &str = "secure-json";

const SYSTEM_PROMPT: &str = "You scan JSON documents for likely secrets: keys that look \
like passwords, API keys, tokens, or other credentials. Replace each sensitive value with \
the string \"[REDACTED]\" while preserving the JSON structure exactly. Respond with a JSON \
object with two fields: \"redacted_json_string\" (the redacted document as a JSON-encoded \
string) and \"redacted_keys\" (an array of the flagged key names; empty if nothing was \
found).";

/// Input to the secure flow
#[derive(Debug, Clone, Serialize)]
pub struct SecureJsonInput {
    pub json_string: String,
}

/// Wire shape of the service reply
#[derive(Debug, Clone, Deserialize)]
struct SecureJsonOutput {
    redacted_json_string: String,
    redacted_keys: Vec<String>,
}

/// Scan result after local post-processing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityScanResult {
    /// Redacted document, re-serialized at 2-space indentation
    pub redacted_json: String,
    /// Key names the service flagged; empty means no secrets were found
    pub redacted_keys: Vec<String>,
}

impl SecurityScanResult {
    pub fn found_secrets(&self) -> bool {
        !self.redacted_keys.is_empty()
    }
}

fn response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "redacted_json_string": { "type": "string" },
            "redacted_keys": {
                "type": "array",
                "items": { "type": "string" }
            }
        },
        "required": ["redacted_json_string", "redacted_keys"]
    })
}

fn render_user(input: &SecureJsonInput) -> String {
    format!(
        "Scan the following JSON document for secrets and redact them.\n\nJSON document:\n{}",
        input.json_string
    )
}

/// Ask the model service to scan a JSON document for secrets
pub async fn secure_json<S: ModelService>(
    service: &S,
    input: &SecureJsonInput,
) -> Result<SecurityScanResult> {
    let output: SecureJsonOutput = super::run_flow(
        service,
        FLOW,
        SYSTEM_PROMPT,
        render_user(input),
        &response_schema(),
    )
    .await?;

    // The redacted text must itself be valid JSON; anything else is a
    // malformed service reply, not a usable scan result.
    let redacted: Value =
        serde_json::from_str(&output.redacted_json_string).map_err(|e| Error::SchemaValidation {
            message: format!("Redacted document from service is not valid JSON: {}", e),
            source: None,
        })?;

    Ok(SecurityScanResult {
        redacted_json: serde_json::to_string_pretty(&redacted)?,
        redacted_keys: output.redacted_keys,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::{FailingService, StaticService};

    fn input() -> SecureJsonInput {
        SecureJsonInput {
            json_string: r#"{"user": "amy", "apiKey": "q9a8s7d6"}"#.to_string(),
        }
    }

    #[tokio::test]
    async fn test_scan_pretty_prints_redacted_document() {
        let service = StaticService {
            response: json!({
                "redacted_json_string": r#"{"user":"amy","apiKey":"[REDACTED]"}"#,
                "redacted_keys": ["apiKey"]
            }),
        };
        let result = secure_json(&service, &input()).await.unwrap();
        assert!(result.found_secrets());
        assert_eq!(result.redacted_keys, vec!["apiKey"]);
        assert_eq!(
            result.redacted_json,
            "{\n  \"user\": \"amy\",\n  \"apiKey\": \"[REDACTED]\"\n}"
        );
    }

    #[tokio::test]
    async fn test_scan_with_no_findings() {
        let service = StaticService {
            response: json!({
                "redacted_json_string": r#"{"user":"amy"}"#,
                "redacted_keys": []
            }),
        };
        let result = secure_json(&service, &input()).await.unwrap();
        assert!(!result.found_secrets());
    }

    #[tokio::test]
    async fn test_scan_rejects_unparseable_redaction() {
        let service = StaticService {
            response: json!({
                "redacted_json_string": "{not json",
                "redacted_keys": ["apiKey"]
            }),
        };
        let err = secure_json(&service, &input()).await.unwrap_err();
        assert!(matches!(err, Error::SchemaValidation { .. }));
    }

    #[tokio::test]
    async fn test_scan_propagates_service_failure() {
        let err = secure_json(&FailingService, &input()).await.unwrap_err();
        assert!(matches!(err, Error::Service { .. }));
    }
}
