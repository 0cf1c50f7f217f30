//! Security scanner adapter
//!
//! Runs the secret-detection flow over a valid document and keeps the scan
//! result for a later "apply redaction" step. Applying is purely local: the
//! redacted text replaces the document through the normal `set_text` path.

use crate::error::{Error, Result};
use crate::flows::secure::{secure_json, SecureJsonInput, SecurityScanResult};
use crate::service::ModelService;
use crate::slot::ResultSlot;
use crate::store::{DocumentSnapshot, DocumentStore};

/// Stateful secret scanner over a model service
pub struct SecurityScanner<S> {
    service: S,
    slot: ResultSlot<SecurityScanResult>,
}

impl<S: ModelService> SecurityScanner<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            slot: ResultSlot::new(),
        }
    }

    /// Scan a valid document for likely secrets.
    ///
    /// Scanning an invalid document is an input error; the previous scan
    /// result is discarded either way so nothing stale survives.
    pub async fn scan(&self, snapshot: &DocumentSnapshot) -> Result<SecurityScanResult> {
        if !snapshot.is_valid() {
            self.slot.invalidate();
            return Err(Error::input(
                "Please provide valid JSON to scan for secrets.",
            ));
        }

        let ticket = self.slot.issue();
        let input = SecureJsonInput {
            json_string: snapshot.text.clone(),
        };
        let result = secure_json(&self.service, &input).await?;
        self.slot.commit(ticket, result.clone());
        Ok(result)
    }

    /// The most recent scan result, if one is held
    pub fn result(&self) -> Option<SecurityScanResult> {
        self.slot.get()
    }

    /// Replace the document text with the redacted text and re-validate.
    /// The redacted text was parse-checked on receipt, so the document
    /// always ends up `Valid`.
    pub fn apply_redaction(&self, store: &mut DocumentStore) -> Result<()> {
        let result = self
            .slot
            .get()
            .ok_or_else(|| Error::input("No scan result to apply."))?;
        store.set_text(result.redacted_json);
        self.slot.invalidate();
        Ok(())
    }

    /// Discard the stored result and supersede in-flight requests
    pub fn invalidate(&self) {
        self.slot.invalidate();
    }
}
