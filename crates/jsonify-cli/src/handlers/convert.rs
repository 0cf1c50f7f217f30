//! Convert command handler

use tracing::{info, instrument};

use jsonify_core::{Converter, HttpModelService, TargetFormat};

use crate::cli::ConvertArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputWriter;

/// Handle the convert command
#[instrument(skip(config, output), fields(file = %args.input.display(), to = ?args.to))]
pub async fn handle_convert(
    args: ConvertArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let target: TargetFormat = args.to.into();
    info!(%target, "Converting document");

    let store = super::load_store(&args.input)?;
    let snapshot = store.snapshot();
    if !snapshot.is_valid() {
        return Err(Error::InvalidDocument {
            message: snapshot
                .status
                .message()
                .unwrap_or("document is not valid JSON")
                .to_string(),
        });
    }

    let service = HttpModelService::new(config.service_config())?;
    let converter = Converter::new(service);

    let spinner = output.spinner(&format!("Converting to {}...", target));
    let result = converter.convert(&snapshot, target).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let converted = match result {
        Ok(Some(converted)) => converted,
        // A one-shot CLI call cannot be superseded, so this only happens
        // when the snapshot was stale
        Ok(None) => {
            return Err(Error::other(format!(
                "Conversion to {} produced no result",
                target
            )))
        }
        Err(err) => {
            output.error(&format!("Could not convert JSON to {}.", target))?;
            return Err(err.into());
        }
    };

    super::emit(output, args.save_to.as_deref(), &converted.text)
}
