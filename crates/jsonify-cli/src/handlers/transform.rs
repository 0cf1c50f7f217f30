//! Format and minify command handlers

use tracing::{info, instrument};

use crate::cli::TransformArgs;
use crate::error::Result;
use crate::output::OutputWriter;

/// Handle the format command
#[instrument(skip(output), fields(file = %args.input.display()))]
pub async fn handle_format(args: TransformArgs, output: &mut OutputWriter) -> Result<()> {
    info!("Formatting document");
    let mut store = super::load_store(&args.input)?;
    store.format()?;
    super::emit(output, args.save_to.as_deref(), store.text())
}

/// Handle the minify command
#[instrument(skip(output), fields(file = %args.input.display()))]
pub async fn handle_minify(args: TransformArgs, output: &mut OutputWriter) -> Result<()> {
    info!("Minifying document");
    let mut store = super::load_store(&args.input)?;
    store.minify()?;
    super::emit(output, args.save_to.as_deref(), store.text())
}
