//! JSONify Core - Document engine for the JSONify editing utility
//!
//! This crate provides the core functionality behind JSONify: a JSON
//! document state machine with format/minify transforms, a collapsible tree
//! model, size/token statistics, and model-service flows for error
//! explanation, format conversion, and secret detection.
//!
//! # Main Components
//!
//! - **Error Handling**: Failure taxonomy using `thiserror` and `anyhow`
//! - **Document**: The validation/transform state machine and its store
//! - **Adapters**: Converter, security scanner, and error explainer, each
//!   one round trip to the model service with latest-result-wins results
//! - **Flows**: Prompt templates with schema-validated structured replies
//! - **Tree / Analyzer**: Pure derivations of the parsed value
//!
//! # Example
//!
//! ```no_run
//! use jsonify_core::Document;
//!
//! let mut doc = Document::from_text(r#"{"a": 1}"#);
//! doc.format()?;
//! assert!(doc.status().is_valid());
//! # Ok::<(), jsonify_core::Error>(())
//! ```

pub mod adapters;
pub mod analyzer;
pub mod document;
pub mod error;
pub mod flows;
pub mod service;
pub mod slot;
pub mod store;
pub mod tree;


// Re-export main types for convenience
pub use error::{Error, ErrorCategory, Result};
pub use document::{Document, ValidationStatus, EMPTY_INPUT_MESSAGE, SAMPLE_DOCUMENT};
pub use store::{DocumentSnapshot, DocumentStore};

pub use adapters::{ConversionResult, Converter, ErrorExplainer, SecurityScanner};
pub use analyzer::SizeReport;
pub use flows::{
    ExplainErrorInput, ExplainErrorOutput, SecurityScanResult, TargetFormat,
};
pub use service::{
    HttpModelService, ModelService, PromptRequest, RetryPolicy, ServiceConfig, API_KEY_ENV,
};
pub use slot::ResultSlot;
pub use tree::{NodeKind, TreeNode, DEFAULT_EXPANDED_DEPTH};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_sample_document_round_trips() {
        let doc = Document::sample();
        assert!(doc.status().is_valid());
        let tree = TreeNode::build(doc.parsed().unwrap());
        assert!(tree.child_count > 0);
    }
}
