//! Sample command handler

use tracing::instrument;

use jsonify_core::SAMPLE_DOCUMENT;

use crate::cli::SampleArgs;
use crate::error::Result;
use crate::output::OutputWriter;

/// Handle the sample command
#[instrument(skip(output))]
pub async fn handle_sample(args: SampleArgs, output: &mut OutputWriter) -> Result<()> {
    super::emit(output, args.save_to.as_deref(), SAMPLE_DOCUMENT)
}
