//! Size and token statistics for a valid document
//!
//! Pure and synchronous; no service call. The token estimate is the fixed
//! `ceil(chars / 4)` heuristic, not a real tokenizer.

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::store::DocumentSnapshot;

/// Size statistics for a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SizeReport {
    /// UTF-8 size of the document text in bytes
    pub byte_size: u64,
    /// Estimated token count, `ceil(chars / 4)`
    pub token_estimate: u64,
    /// Size of the value re-serialized with no whitespace
    pub minified_byte_size: u64,
    /// Bytes saved by minifying, never negative
    pub savings: u64,
}

impl SizeReport {
    /// Measure a document's text and parsed value
    pub fn measure(text: &str, parsed: &Value) -> Result<Self> {
        let byte_size = text.len() as u64;
        let chars = text.chars().count() as u64;
        let token_estimate = chars.div_ceil(4);
        let minified_byte_size = serde_json::to_string(parsed)?.len() as u64;
        Ok(Self {
            byte_size,
            token_estimate,
            minified_byte_size,
            savings: byte_size.saturating_sub(minified_byte_size),
        })
    }

    /// Measure a snapshot; `None` when the document is not valid, in which
    /// case all statistics are reported as unavailable.
    pub fn for_snapshot(snapshot: &DocumentSnapshot) -> Result<Option<Self>> {
        match &snapshot.parsed {
            Some(value) if snapshot.is_valid() => {
                Ok(Some(Self::measure(&snapshot.text, value)?))
            }
            _ => Ok(None),
        }
    }

    /// Byte size expressed in kilobytes
    pub fn kilobytes(bytes: u64) -> f64 {
        bytes as f64 / 1024.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::store::DocumentStore;
    use serde_json::json;

    #[test]
    fn test_minimal_document() {
        let report = SizeReport::measure(r#"{"a":1}"#, &json!({"a": 1})).unwrap();
        assert_eq!(report.byte_size, 8);
        assert_eq!(report.minified_byte_size, 8);
        assert_eq!(report.savings, 0);
        assert_eq!(report.token_estimate, 2);
    }

    #[test]
    fn test_formatted_document_has_savings() {
        let text = "{\n  \"a\": 1\n}";
        let report = SizeReport::measure(text, &json!({"a": 1})).unwrap();
        assert_eq!(report.byte_size, text.len() as u64);
        assert_eq!(report.minified_byte_size, 8);
        assert_eq!(report.savings, text.len() as u64 - 8);
    }

    #[test]
    fn test_token_estimate_rounds_up() {
        let report = SizeReport::measure(r#"{"ab":1}"#, &json!({"ab": 1})).unwrap();
        // 9 chars -> ceil(9/4) = 3
        assert_eq!(report.token_estimate, 3);
    }

    #[test]
    fn test_invalid_snapshot_reports_unavailable() {
        let store = DocumentStore::with_document(Document::from_text("{bad"));
        let report = SizeReport::for_snapshot(&store.snapshot()).unwrap();
        assert!(report.is_none());
    }

    #[test]
    fn test_valid_snapshot_measures() {
        let store = DocumentStore::with_document(Document::from_text(r#"{"a":1}"#));
        let report = SizeReport::for_snapshot(&store.snapshot()).unwrap().unwrap();
        assert_eq!(report.byte_size, 8);
    }

    #[test]
    fn test_kilobytes() {
        assert!((SizeReport::kilobytes(2048) - 2.0).abs() < f64::EPSILON);
    }
}
