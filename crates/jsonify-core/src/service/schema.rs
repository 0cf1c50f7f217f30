//! Response schema validation for model-service flows
//!
//! Every flow carries an embedded JSON Schema describing the structured
//! object the model must return. Responses are validated against it before
//! deserialization, so a malformed reply surfaces as a schema failure
//! instead of a confusing deserialization error deeper in.

use serde_json::Value;

use crate::error::{Error, Result};

/// Validate a service response against a flow's response schema.
///
/// Collects every violation into one message; an unbuildable schema is a
/// programming error reported as an internal failure.
pub fn validate_response(flow: &str, schema: &Value, response: &Value) -> Result<()> {
    let validator = jsonschema::validator_for(schema).map_err(|e| Error::Internal {
        message: format!("Invalid response schema for flow '{}'", flow),
        source: anyhow::anyhow!(e.to_string()),
    })?;

    let violations: Vec<String> = validator
        .iter_errors(response)
        .map(|err| format!("{} at {}", err, err.instance_path))
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(Error::SchemaValidation {
            message: format!(
                "Response for flow '{}' does not match its schema: {}",
                flow,
                violations.join("; ")
            ),
            source: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "explanation": { "type": "string" },
                "suggested_fix": { "type": "string" }
            },
            "required": ["explanation", "suggested_fix"],
            "additionalProperties": false
        })
    }

    #[test]
    fn test_valid_response_passes() {
        let response = json!({
            "explanation": "missing comma",
            "suggested_fix": "{\"a\": 1}"
        });
        assert!(validate_response("explain", &schema(), &response).is_ok());
    }

    #[test]
    fn test_missing_field_fails() {
        let response = json!({ "explanation": "missing comma" });
        let err = validate_response("explain", &schema(), &response).unwrap_err();
        assert!(matches!(err, Error::SchemaValidation { .. }));
        assert!(err.to_string().contains("explain"));
    }

    #[test]
    fn test_wrong_type_fails() {
        let response = json!({
            "explanation": 42,
            "suggested_fix": "x"
        });
        assert!(validate_response("explain", &schema(), &response).is_err());
    }
}
