//! Validate command handler

use serde_json::json;
use tracing::{info, instrument};

use jsonify_core::ValidationStatus;

use crate::cli::{OutputFormat, ValidateArgs};
use crate::error::{Error, Result};
use crate::output::OutputWriter;

/// Handle the validate command
#[instrument(skip(output), fields(file = %args.input.display()))]
pub async fn handle_validate(args: ValidateArgs, output: &mut OutputWriter) -> Result<()> {
    info!("Validating document");
    let mut store = super::load_store(&args.input)?;
    let status = store.validate();

    if output.format() != OutputFormat::Human {
        let report = match &status {
            ValidationStatus::Valid => json!({ "status": "valid" }),
            ValidationStatus::Invalid { message } => {
                json!({ "status": "invalid", "message": message })
            }
            ValidationStatus::Idle => json!({ "status": "idle" }),
        };
        output.value(&report)?;
    }

    match status {
        ValidationStatus::Valid => {
            output.success("JSON is valid! No syntax errors detected.")?;
            Ok(())
        }
        ValidationStatus::Invalid { message } => {
            output.error(&format!("Validation error: {}", message))?;
            output.info("Run 'jsonify explain' for an AI-powered explanation.")?;
            Err(Error::InvalidDocument { message })
        }
        ValidationStatus::Idle => Ok(()),
    }
}
