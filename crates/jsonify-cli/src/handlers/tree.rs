//! Tree command handler

use tracing::{info, instrument};

use jsonify_core::TreeNode;

use crate::cli::{OutputFormat, TreeArgs};
use crate::error::{Error, Result};
use crate::output::OutputWriter;

/// Handle the tree command
#[instrument(skip(output), fields(file = %args.input.display()))]
pub async fn handle_tree(args: TreeArgs, output: &mut OutputWriter) -> Result<()> {
    info!("Rendering tree view");
    let store = super::load_store(&args.input)?;
    let snapshot = store.snapshot();

    let Some(parsed) = snapshot.parsed.as_ref() else {
        return Err(Error::InvalidDocument {
            message: snapshot
                .status
                .message()
                .unwrap_or("document is not valid JSON")
                .to_string(),
        });
    };

    if output.format() != OutputFormat::Human {
        // Structured output modes get the parsed value itself
        output.value(parsed)?;
        return Ok(());
    }

    let tree = match args.depth {
        Some(depth) => TreeNode::build_with_depth(parsed, depth),
        None => TreeNode::build(parsed),
    };
    output.write(&tree.render_text())
}
