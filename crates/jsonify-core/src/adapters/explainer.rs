//! Error explanation adapter
//!
//! Only an invalid document has anything to explain. The suggested fix is
//! applied through the normal `set_text` path, so re-validation may still
//! find the document invalid; that outcome is reported, not hidden.

use crate::document::ValidationStatus;
use crate::error::{Error, Result};
use crate::flows::explain::{explain_json_error, ExplainErrorInput, ExplainErrorOutput};
use crate::service::ModelService;
use crate::slot::ResultSlot;
use crate::store::{DocumentSnapshot, DocumentStore};

/// Stateful error explainer over a model service
pub struct ErrorExplainer<S> {
    service: S,
    slot: ResultSlot<ExplainErrorOutput>,
}

impl<S: ModelService> ErrorExplainer<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            slot: ResultSlot::new(),
        }
    }

    /// Ask the model to explain the snapshot's parse error
    pub async fn explain(&self, snapshot: &DocumentSnapshot) -> Result<ExplainErrorOutput> {
        let message = match &snapshot.status {
            ValidationStatus::Invalid { message } => message.clone(),
            _ => {
                return Err(Error::input(
                    "The document is valid; there is no error to explain.",
                ))
            }
        };

        let ticket = self.slot.issue();
        let input = ExplainErrorInput {
            json_string: snapshot.text.clone(),
            error_message: message,
        };
        let output = explain_json_error(&self.service, &input).await?;
        self.slot.commit(ticket, output.clone());
        Ok(output)
    }

    /// The most recent explanation, if one is held
    pub fn result(&self) -> Option<ExplainErrorOutput> {
        self.slot.get()
    }

    /// Write the suggested fix into the document and report the resulting
    /// status. The fix is not guaranteed to be valid JSON.
    pub fn apply_fix(&self, store: &mut DocumentStore) -> Result<ValidationStatus> {
        let output = self
            .slot
            .get()
            .ok_or_else(|| Error::input("No suggested fix to apply."))?;
        store.set_text(output.suggested_fix);
        self.slot.invalidate();
        Ok(store.status().clone())
    }

    /// Discard the stored result and supersede in-flight requests
    pub fn invalidate(&self) {
        self.slot.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::service::testing::StaticService;
    use serde_json::json;

    fn invalid_store() -> DocumentStore {
        DocumentStore::with_document(Document::from_text("{\"a\": }"))
    }

    fn explainer_suggesting(fix: &str) -> ErrorExplainer<StaticService> {
        ErrorExplainer::new(StaticService {
            response: json!({
                "explanation": "A value is missing after the colon.",
                "suggested_fix": fix
            }),
        })
    }

    #[tokio::test]
    async fn test_explain_invalid_document() {
        let explainer = explainer_suggesting("{\"a\": null}");
        let output = explainer.explain(&invalid_store().snapshot()).await.unwrap();
        assert!(!output.explanation.is_empty());
        assert!(explainer.result().is_some());
    }

    #[tokio::test]
    async fn test_explain_rejects_valid_document() {
        let explainer = explainer_suggesting("{}");
        let store = DocumentStore::with_document(Document::from_text(r#"{"ok": true}"#));
        let err = explainer.explain(&store.snapshot()).await.unwrap_err();
        assert!(matches!(err, Error::Input { .. }));
    }

    #[tokio::test]
    async fn test_apply_fix_revalidates_to_valid() {
        let explainer = explainer_suggesting("{\"a\": null}");
        let mut store = invalid_store();
        explainer.explain(&store.snapshot()).await.unwrap();

        let status = explainer.apply_fix(&mut store).unwrap();
        assert!(status.is_valid());
        assert_eq!(store.text(), "{\"a\": null}");
    }

    #[tokio::test]
    async fn test_apply_fix_may_still_be_invalid() {
        // The model's suggestion is itself broken; re-validation reports it
        let explainer = explainer_suggesting("{\"a\": stillbroken");
        let mut store = invalid_store();
        explainer.explain(&store.snapshot()).await.unwrap();

        let status = explainer.apply_fix(&mut store).unwrap();
        assert!(!status.is_valid());
    }
}
