//! The JSON document state machine
//!
//! A [`Document`] owns the raw text, its parsed value (when the text is
//! syntactically valid), and a validation status. Every mutation goes through
//! [`Document::set_text`], which re-derives the parsed value and status, except
//! for the format/minify transforms which supply pre-validated text. Parsing is
//! total: malformed text becomes the `Invalid` state, never a panic.

use serde_json::Value;

use crate::error::{Error, Result};

/// Message used for empty or whitespace-only input, which is rejected
/// without invoking the parser.
pub const EMPTY_INPUT_MESSAGE: &str = "JSON input is empty.";

/// Sample document seeding a fresh editing session
pub const SAMPLE_DOCUMENT: &str = r#"{
  "name": "JSONify",
  "version": "1.0.0",
  "description": "A tool to format, validate, and minify JSON.",
  "features": [
    "Format",
    "Validate",
    "Minify",
    "AI Error Explanation"
  ],
  "isAwesome": true,
  "bugs": null,
  "userProfile": {
    "login": "testuser",
    "email": "test@example.com",
    "password": "supersecretpassword123",
    "apiKey": "q9a8s7d6f5g4h3j2k1l0",
    "session_token": "asdasd987a9s8d7a9s8d79a8sd7"
  }
}"#;

/// Validation status of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationStatus {
    /// No text has been provided yet
    Idle,
    /// The text parses as JSON
    Valid,
    /// The text does not parse; carries the parser's error description
    Invalid { message: String },
}

impl ValidationStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationStatus::Valid)
    }

    /// The error description for `Invalid`, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            ValidationStatus::Invalid { message } => Some(message),
            _ => None,
        }
    }
}

/// The single source-of-truth JSON document
///
/// Invariants:
/// - `status == Valid` implies `parsed == Some(parse(text))`
/// - `status != Valid` implies `parsed == None`
/// - `revision` increases on every mutation; adapters use it as the
///   correlation token for asynchronous results.
#[derive(Debug, Clone)]
pub struct Document {
    text: String,
    parsed: Option<Value>,
    status: ValidationStatus,
    revision: u64,
}

impl Document {
    /// Create an empty document in the `Idle` state
    pub fn new() -> Self {
        Self {
            text: String::new(),
            parsed: None,
            status: ValidationStatus::Idle,
            revision: 0,
        }
    }

    /// Create a document seeded with the sample text, already validated
    pub fn sample() -> Self {
        let mut doc = Self::new();
        doc.set_text(SAMPLE_DOCUMENT);
        debug_assert!(doc.status.is_valid());
        doc
    }

    /// Create a document from initial text, validating it
    pub fn from_text(text: impl Into<String>) -> Self {
        let mut doc = Self::new();
        doc.set_text(text);
        doc
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn parsed(&self) -> Option<&Value> {
        self.parsed.as_ref()
    }

    pub fn status(&self) -> &ValidationStatus {
        &self.status
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the document text and synchronously re-validate it.
    ///
    /// Empty or whitespace-only input becomes `Invalid` with
    /// [`EMPTY_INPUT_MESSAGE`] without invoking the parser.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.revision += 1;
        self.revalidate();
    }

    /// Re-run validation over the current text without changing it
    pub fn validate(&mut self) -> &ValidationStatus {
        self.revalidate();
        &self.status
    }

    /// Replace the text with the parsed value re-serialized at 2-space
    /// indentation. Fails with the parse error (and records the `Invalid`
    /// state) when the current text does not parse.
    pub fn format(&mut self) -> Result<()> {
        let value = self.reparse_for_transform()?;
        let formatted = serde_json::to_string_pretty(&value)?;
        self.set_prevalidated(formatted, value);
        Ok(())
    }

    /// Replace the text with the parsed value re-serialized with no
    /// inserted whitespace. Same contract as [`Document::format`].
    pub fn minify(&mut self) -> Result<()> {
        let value = self.reparse_for_transform()?;
        let minified = serde_json::to_string(&value)?;
        self.set_prevalidated(minified, value);
        Ok(())
    }

    /// Store text whose parse is already known, skipping re-validation.
    /// Only transforms use this; the text must serialize `value` exactly.
    fn set_prevalidated(&mut self, text: String, value: Value) {
        self.text = text;
        self.parsed = Some(value);
        self.status = ValidationStatus::Valid;
        self.revision += 1;
    }

    fn revalidate(&mut self) {
        if self.text.trim().is_empty() {
            self.parsed = None;
            self.status = ValidationStatus::Invalid {
                message: EMPTY_INPUT_MESSAGE.to_string(),
            };
            return;
        }
        match serde_json::from_str::<Value>(&self.text) {
            Ok(value) => {
                self.parsed = Some(value);
                self.status = ValidationStatus::Valid;
            }
            Err(err) => {
                self.parsed = None;
                self.status = ValidationStatus::Invalid {
                    message: err.to_string(),
                };
            }
        }
    }

    /// Parse the current text for a transform, recording failures in the
    /// document status so the error surfaces in the status indicator too.
    fn reparse_for_transform(&mut self) -> Result<Value> {
        if self.text.trim().is_empty() {
            self.parsed = None;
            self.status = ValidationStatus::Invalid {
                message: EMPTY_INPUT_MESSAGE.to_string(),
            };
            return Err(Error::input(EMPTY_INPUT_MESSAGE));
        }
        match serde_json::from_str::<Value>(&self.text) {
            Ok(value) => Ok(value),
            Err(err) => {
                self.parsed = None;
                self.status = ValidationStatus::Invalid {
                    message: err.to_string(),
                };
                Err(Error::parse(&err))
            }
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_sample_document_is_valid() {
        let doc = Document::sample();
        assert!(doc.status().is_valid());
        assert!(doc.parsed().is_some());
        assert_eq!(doc.parsed().unwrap()["name"], json!("JSONify"));
    }

    #[test]
    fn test_set_text_valid() {
        let mut doc = Document::new();
        doc.set_text(r#"{"a": 1}"#);
        assert!(doc.status().is_valid());
        assert_eq!(doc.parsed(), Some(&json!({"a": 1})));
    }

    #[test]
    fn test_set_text_invalid_clears_parsed() {
        let mut doc = Document::from_text(r#"{"a": 1}"#);
        doc.set_text("{broken");
        assert!(!doc.status().is_valid());
        assert!(doc.parsed().is_none());
        assert!(doc.status().message().is_some());
    }

    #[test]
    fn test_empty_input_rejected_without_parse() {
        let mut doc = Document::new();
        doc.set_text("   \n\t");
        assert_eq!(doc.status().message(), Some(EMPTY_INPUT_MESSAGE));
        assert!(doc.parsed().is_none());
    }

    #[test]
    fn test_minify_exact_output() {
        let mut doc = Document::from_text("{\n  \"a\": 1\n}");
        doc.minify().unwrap();
        assert_eq!(doc.text(), r#"{"a":1}"#);
        assert!(doc.status().is_valid());
    }

    #[test]
    fn test_format_exact_output() {
        let mut doc = Document::from_text(r#"{"a":1}"#);
        doc.format().unwrap();
        assert_eq!(doc.text(), "{\n  \"a\": 1\n}");
        assert!(doc.status().is_valid());
    }

    #[test]
    fn test_format_is_idempotent() {
        let mut doc = Document::sample();
        doc.format().unwrap();
        let once = doc.text().to_string();
        doc.format().unwrap();
        assert_eq!(doc.text(), once);
    }

    #[test]
    fn test_transform_on_invalid_text_surfaces_error() {
        let mut doc = Document::from_text("{nope");
        let err = doc.format().unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
        assert!(!doc.status().is_valid());
        // The text is left as the user wrote it
        assert_eq!(doc.text(), "{nope");
    }

    #[test]
    fn test_transform_on_empty_text_surfaces_input_error() {
        let mut doc = Document::new();
        let err = doc.minify().unwrap_err();
        assert!(matches!(err, Error::Input { .. }));
        assert_eq!(doc.status().message(), Some(EMPTY_INPUT_MESSAGE));
    }

    #[test]
    fn test_revision_increments_on_every_mutation() {
        let mut doc = Document::from_text(r#"{"a":1}"#);
        let r0 = doc.revision();
        doc.format().unwrap();
        let r1 = doc.revision();
        doc.set_text("{bad");
        let r2 = doc.revision();
        assert!(r0 < r1 && r1 < r2);
    }

    #[test]
    fn test_key_order_preserved_through_transforms() {
        let mut doc = Document::from_text(r#"{"z": 1, "a": 2, "m": 3}"#);
        doc.minify().unwrap();
        assert_eq!(doc.text(), r#"{"z":1,"a":2,"m":3}"#);
    }

    /// Strategy generating arbitrary JSON values, a few levels deep
    fn arb_json() -> impl Strategy<Value = serde_json::Value> {
        let leaf = prop_oneof![
            Just(serde_json::Value::Null),
            any::<bool>().prop_map(serde_json::Value::from),
            any::<i64>().prop_map(serde_json::Value::from),
            "[a-zA-Z0-9 _.-]{0,20}".prop_map(serde_json::Value::from),
        ];
        leaf.prop_recursive(3, 32, 8, |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..6)
                    .prop_map(serde_json::Value::from),
                proptest::collection::vec(("[a-zA-Z0-9_]{1,10}", inner), 0..6).prop_map(
                    |entries| {
                        let mut map = serde_json::Map::new();
                        for (k, v) in entries {
                            map.insert(k, v);
                        }
                        serde_json::Value::Object(map)
                    }
                ),
            ]
        })
    }

    proptest! {
        /// minify followed by format preserves value equality for any
        /// valid document (whitespace is not preserved, the value is)
        #[test]
        fn prop_minify_format_roundtrip(value in arb_json()) {
            let text = serde_json::to_string_pretty(&value).unwrap();
            let mut doc = Document::from_text(text);
            prop_assert!(doc.status().is_valid());
            let before = doc.parsed().unwrap().clone();
            doc.minify().unwrap();
            doc.format().unwrap();
            prop_assert_eq!(doc.parsed().unwrap(), &before);
        }

        /// set_text yields Valid iff the text parses
        #[test]
        fn prop_status_matches_parseability(text in ".{0,80}") {
            let mut doc = Document::new();
            doc.set_text(text.clone());
            let parseable = !text.trim().is_empty()
                && serde_json::from_str::<serde_json::Value>(&text).is_ok();
            prop_assert_eq!(doc.status().is_valid(), parseable);
        }
    }
}
