//! Explain command handler

use serde_json::json;
use tracing::{info, instrument};

use jsonify_core::{ErrorExplainer, HttpModelService};

use crate::cli::{ExplainArgs, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;

/// Handle the explain command
#[instrument(skip(config, output), fields(file = %args.input.display(), apply = args.apply))]
pub async fn handle_explain(
    args: ExplainArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    info!("Explaining parse error");
    let mut store = super::load_store(&args.input)?;
    let snapshot = store.snapshot();

    if snapshot.is_valid() {
        output.success("JSON is valid! There is no error to explain.")?;
        return Ok(());
    }

    let service = HttpModelService::new(config.service_config())?;
    let explainer = ErrorExplainer::new(service);

    let spinner = output.spinner("Asking the model to explain the error...");
    let result = explainer.explain(&snapshot).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let explanation = result?;

    if output.format() != OutputFormat::Human {
        output.value(&json!({
            "explanation": explanation.explanation,
            "suggested_fix": explanation.suggested_fix,
        }))?;
    } else {
        output.section("The Problem")?;
        output.writeln(&format!("  {}", explanation.explanation))?;
        output.section("Suggested Fix")?;
        output.writeln(&explanation.suggested_fix)?;
    }

    if args.apply {
        let status = explainer.apply_fix(&mut store)?;
        if status.is_valid() {
            output.success("Fix applied; the document is now valid.")?;
        } else {
            output.warning(&format!(
                "Fix applied, but the document is still invalid: {}",
                status.message().unwrap_or("unknown error")
            ))?;
        }
        super::emit(output, args.save_to.as_deref(), store.text())?;
    }

    Ok(())
}
