//! Converter adapter
//!
//! Reacts to document and target-format changes by re-running the convert
//! flow. Results land in a private latest-result-wins slot, so a response
//! from a superseded request can never overwrite a newer one, and an
//! invalid document clears the slot instead of leaving a stale conversion
//! on display.

use tracing::debug;

use crate::error::Result;
use crate::flows::convert::{convert_format, ConvertFormatInput, TargetFormat};
use crate::service::ModelService;
use crate::slot::ResultSlot;
use crate::store::DocumentSnapshot;

/// A finished conversion, tagged with the document revision it was made from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub format: TargetFormat,
    pub text: String,
    pub revision: u64,
}

/// Stateful converter over a model service
pub struct Converter<S> {
    service: S,
    slot: ResultSlot<ConversionResult>,
}

impl<S: ModelService> Converter<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            slot: ResultSlot::new(),
        }
    }

    /// Convert the snapshot's document to the target format.
    ///
    /// Returns `Ok(None)` without calling the service when the document is
    /// not valid (clearing any previous result), and `Ok(None)` when the
    /// response arrived superseded. Service failures propagate; the caller
    /// renders a format-specific message and the document is untouched.
    pub async fn convert(
        &self,
        snapshot: &DocumentSnapshot,
        target: TargetFormat,
    ) -> Result<Option<ConversionResult>> {
        if !snapshot.is_valid() {
            self.slot.invalidate();
            return Ok(None);
        }

        let ticket = self.slot.issue();
        let input = ConvertFormatInput {
            json_string: snapshot.text.clone(),
            target_format: target,
        };
        let output = convert_format(&self.service, &input).await?;

        let result = ConversionResult {
            format: target,
            text: output.converted_string,
            revision: snapshot.revision,
        };
        if self.slot.commit(ticket, result.clone()) {
            Ok(Some(result))
        } else {
            debug!(format = %target, revision = snapshot.revision, "Discarding superseded conversion");
            Ok(None)
        }
    }

    /// The stored conversion for this snapshot, if it is still current
    pub fn result_for(&self, snapshot: &DocumentSnapshot) -> Option<ConversionResult> {
        self.slot
            .get()
            .filter(|r| r.revision == snapshot.revision)
    }

    /// Discard the stored result and supersede in-flight requests
    pub fn invalidate(&self) {
        self.slot.invalidate();
    }
}
