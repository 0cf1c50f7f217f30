//! Document ownership and change publication
//!
//! [`DocumentStore`] is the single logical owner of the [`Document`]. Every
//! mutation republishes an immutable [`DocumentSnapshot`] over a watch
//! channel; adapters subscribe and recompute their derived results from the
//! snapshot instead of sharing mutable state with the engine.

use std::fs;
use std::path::Path;

use tokio::sync::watch;
use tracing::debug;

use crate::document::{Document, ValidationStatus};
use crate::error::{Error, Result};

/// Immutable copy of document state handed to adapters
#[derive(Debug, Clone)]
pub struct DocumentSnapshot {
    pub text: String,
    pub parsed: Option<serde_json::Value>,
    pub status: ValidationStatus,
    pub revision: u64,
}

impl DocumentSnapshot {
    fn of(doc: &Document) -> Self {
        Self {
            text: doc.text().to_string(),
            parsed: doc.parsed().cloned(),
            status: doc.status().clone(),
            revision: doc.revision(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.status.is_valid()
    }
}

/// Single owner of the document, publishing snapshots on every change
pub struct DocumentStore {
    doc: Document,
    tx: watch::Sender<DocumentSnapshot>,
}

impl DocumentStore {
    /// Create a store seeded with the sample document
    pub fn new() -> Self {
        Self::with_document(Document::sample())
    }

    /// Create a store around an existing document
    pub fn with_document(doc: Document) -> Self {
        let (tx, _rx) = watch::channel(DocumentSnapshot::of(&doc));
        Self { doc, tx }
    }

    /// Subscribe to document changes. The receiver always holds the most
    /// recent snapshot; intermediate states may be skipped.
    pub fn subscribe(&self) -> watch::Receiver<DocumentSnapshot> {
        self.tx.subscribe()
    }

    /// Current state as an immutable snapshot
    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot::of(&self.doc)
    }

    pub fn status(&self) -> &ValidationStatus {
        self.doc.status()
    }

    pub fn text(&self) -> &str {
        self.doc.text()
    }

    /// Replace the document text and re-validate
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.doc.set_text(text);
        self.publish();
    }

    /// Re-validate the current text without changing it
    pub fn validate(&mut self) -> ValidationStatus {
        let status = self.doc.validate().clone();
        self.publish();
        status
    }

    /// Format the document at 2-space indentation
    pub fn format(&mut self) -> Result<()> {
        let result = self.doc.format();
        self.publish();
        result
    }

    /// Minify the document
    pub fn minify(&mut self) -> Result<()> {
        let result = self.doc.minify();
        self.publish();
        result
    }

    /// Load a `.json` file into the document.
    ///
    /// A wrong extension or a read failure is reported without mutating the
    /// document; only a fully read file reaches `set_text`.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let is_json = path
            .extension()
            .map(|ext| ext == "json")
            .unwrap_or(false);
        if !is_json {
            return Err(Error::input(format!(
                "Invalid file type: {} (expected a .json file)",
                path.display()
            )));
        }
        let content = fs::read_to_string(path).map_err(|e| Error::Io {
            message: format!("Could not read {}: {}", path.display(), e),
            source: e,
        })?;
        debug!(file = %path.display(), bytes = content.len(), "Loaded document from file");
        self.set_text(content);
        Ok(())
    }

    fn publish(&self) {
        self.tx.send_replace(DocumentSnapshot::of(&self.doc));
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}
