//! Format-conversion flow
//!
//! Serialization into the target format is delegated entirely to the model
//! service; the returned text is passed through without local verification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::service::ModelService;

const FLOW: &str = "convert-format";

const SYSTEM_PROMPT: &str = "You convert JSON documents into other serialization formats. \
Produce syntactically valid output in the requested format, preserving all data and \
structure. Respond with a JSON object with exactly one string field: \"converted_string\" \
(the converted document).";

/// Supported conversion targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetFormat {
    Yaml,
    Xml,
    Toml,
}

impl TargetFormat {
    pub const ALL: [TargetFormat; 3] = [TargetFormat::Yaml, TargetFormat::Xml, TargetFormat::Toml];
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetFormat::Yaml => write!(f, "YAML"),
            TargetFormat::Xml => write!(f, "XML"),
            TargetFormat::Toml => write!(f, "TOML"),
        }
    }
}

impl FromStr for TargetFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" => Ok(TargetFormat::Yaml),
            "xml" => Ok(TargetFormat::Xml),
            "toml" => Ok(TargetFormat::Toml),
            other => Err(Error::input(format!(
                "Unknown target format '{}' (expected yaml, xml, or toml)",
                other
            ))),
        }
    }
}

/// Input to the convert flow
#[derive(Debug, Clone, Serialize)]
pub struct ConvertFormatInput {
    pub json_string: String,
    pub target_format: TargetFormat,
}

/// Converted document text, passed through unverified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertFormatOutput {
    pub converted_string: String,
}

fn response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "converted_string": { "type": "string" }
        },
        "required": ["converted_string"]
    })
}

fn render_user(input: &ConvertFormatInput) -> String {
    format!(
        "Convert the following JSON document to {}.\n\nJSON document:\n{}",
        input.target_format, input.json_string
    )
}

/// Ask the model service to convert a JSON document to another format
pub async fn convert_format<S: ModelService>(
    service: &S,
    input: &ConvertFormatInput,
) -> Result<ConvertFormatOutput> {
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
    use crate::service::testing::{FailingService, StaticService};

    fn input(target: TargetFormat) -> ConvertFormatInput {
        ConvertFormatInput {
            json_string: r#"{"a": 1}"#.to_string(),
            target_format: target,
        }
    }

    #[tokio::test]
    async fn test_convert_passes_result_through_unverified() {
        // Not actually valid YAML; the flow must not care
        let service = StaticService {
            response: json!({ "converted_string": ":::garbage:::" }),
        };
        let output = convert_format(&service, &input(TargetFormat::Yaml))
            .await
            .unwrap();
        assert_eq!(output.converted_string, ":::garbage:::");
    }

    #[tokio::test]
    async fn test_convert_rejects_missing_field() {
        let service = StaticService {
            response: json!({ "output": "a: 1" }),
        };
        let err = convert_format(&service, &input(TargetFormat::Yaml))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::SchemaValidation { .. }));
    }

    #[tokio::test]
    async fn test_convert_propagates_service_failure() {
        let err = convert_format(&FailingService, &input(TargetFormat::Toml))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Service { .. }));
    }

    #[test]
    fn test_target_format_parsing() {
        assert_eq!("yaml".parse::<TargetFormat>().unwrap(), TargetFormat::Yaml);
        assert_eq!("XML".parse::<TargetFormat>().unwrap(), TargetFormat::Xml);
        assert!("csv".parse::<TargetFormat>().is_err());
    }

    #[test]
    fn test_prompt_names_target_format() {
        let user = render_user(&input(TargetFormat::Toml));
        assert!(user.contains("to TOML"));
        assert!(user.contains(r#"{"a": 1}"#));
    }
}
