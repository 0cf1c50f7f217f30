//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand,
//! plus the shared input/output plumbing they all use.

mod completions;
mod config;
mod convert;
mod explain;
mod sample;
mod scan;
mod stats;
mod transform;
mod tree;
mod validate;

pub use completions::handle_completions;
pub use config::handle_config;
pub use convert::handle_convert;
pub use explain::handle_explain;
pub use sample::handle_sample;
pub use scan::handle_scan;
pub use stats::handle_stats;
pub use transform::{handle_format, handle_minify};
pub use tree::handle_tree;
pub use validate::handle_validate;

use std::fs;
use std::io::Read;
use std::path::Path;

use jsonify_core::{Document, DocumentStore};

use crate::error::{Error, Result};
use crate::output::OutputWriter;

/// Load the document from a `.json` file path or stdin (`-`).
///
/// File input goes through the store's extension-checked loader; stdin is
/// the paste path and skips the extension check.
pub(crate) fn load_store(input: &Path) -> Result<DocumentStore> {
    let mut store = DocumentStore::with_document(Document::new());

    if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        store.set_text(text);
    } else {
        if !input.exists() {
            return Err(Error::FileNotFound {
                path: input.to_path_buf(),
            });
        }
        store.load_file(input)?;
    }

    Ok(store)
}

/// Write a result document to `--save-to` or stdout
pub(crate) fn emit(
    output: &mut OutputWriter,
    save_to: Option<&Path>,
    content: &str,
) -> Result<()> {
    match save_to {
        Some(path) => {
            fs::write(path, content)?;
            output.success(&format!("Saved to {}", path.display()))?;
        }
        None => {
            output.writeln(content)?;
        }
    }
    Ok(())
}
