//! Scan command handler

use serde_json::json;
use tracing::{info, instrument};

use jsonify_core::{HttpModelService, SecurityScanner};

use crate::cli::{OutputFormat, ScanArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;

/// Handle the scan command
#[instrument(skip(config, output), fields(file = %args.input.display(), apply = args.apply))]
pub async fn handle_scan(
    args: ScanArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    info!("Scanning document for secrets");
    let mut store = super::load_store(&args.input)?;
    let snapshot = store.snapshot();

    let service = HttpModelService::new(config.service_config())?;
    let scanner = SecurityScanner::new(service);

    let spinner = output.spinner("Scanning for secrets...");
    let result = scanner.scan(&snapshot).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let scan = result?;

    if output.format() != OutputFormat::Human {
        output.value(&json!({
            "redacted_keys": scan.redacted_keys,
            "redacted_json": scan.redacted_json,
        }))?;
    } else if scan.found_secrets() {
        output.warning(&format!(
            "Potential secrets found! {} item(s) might be sensitive:",
            scan.redacted_keys.len()
        ))?;
        for key in &scan.redacted_keys {
            output.writeln(&format!("  - {}", key))?;
        }
    } else {
        output.success(
            "No secrets found. The AI scanner did not find any obvious sensitive data.",
        )?;
    }

    if args.apply {
        scanner.apply_redaction(&mut store)?;
        output.info("Redaction applied; sensitive data has been removed.")?;
        super::emit(output, args.save_to.as_deref(), store.text())?;
    } else if output.format() == OutputFormat::Human && scan.found_secrets() {
        output.section("Redacted Document")?;
        output.writeln(&scan.redacted_json)?;
        output.info("Re-run with --apply to use the redacted document.")?;
    }

    Ok(())
}
