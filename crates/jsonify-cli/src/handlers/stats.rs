//! Stats command handler

use serde_json::json;
use tracing::{info, instrument};

use jsonify_core::SizeReport;

use crate::cli::{OutputFormat, StatsArgs};
use crate::error::Result;
use crate::output::OutputWriter;

/// Savings below this many bytes are not worth a tip
const TIP_THRESHOLD_BYTES: u64 = 10;

/// Handle the stats command
#[instrument(skip(output), fields(file = %args.input.display()))]
pub async fn handle_stats(args: StatsArgs, output: &mut OutputWriter) -> Result<()> {
    info!("Analyzing document size");
    let store = super::load_store(&args.input)?;
    let snapshot = store.snapshot();
    let report = SizeReport::for_snapshot(&snapshot)?;

    if output.format() != OutputFormat::Human {
        let payload = match &report {
            Some(report) => json!({ "available": true, "report": report }),
            None => json!({ "available": false, "report": SizeReport::default() }),
        };
        output.value(&payload)?;
        return Ok(());
    }

    let Some(report) = report else {
        output.warning("Performance analysis requires valid JSON.")?;
        return Ok(());
    };

    output.section("Performance")?;
    output.writeln(&format!(
        "  File Size:      {:.2} KB ({} bytes)",
        SizeReport::kilobytes(report.byte_size),
        report.byte_size
    ))?;
    output.writeln(&format!("  Est. Tokens:    {}", report.token_estimate))?;
    output.writeln(&format!(
        "  Minified Size:  {:.2} KB ({} bytes)",
        SizeReport::kilobytes(report.minified_byte_size),
        report.minified_byte_size
    ))?;

    if report.savings > TIP_THRESHOLD_BYTES {
        output.section("Optimization Tip")?;
        output.writeln(&format!(
            "  You could save ~{:.2} KB by minifying this JSON. Less whitespace \
             means faster downloads and lower costs.",
            SizeReport::kilobytes(report.savings)
        ))?;
    }

    Ok(())
}
