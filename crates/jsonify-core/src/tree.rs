//! Collapsible tree model over a parsed JSON value
//!
//! The tree is a pure derivation of the parsed value: structure, per-node
//! previews, and an expand/collapse flag per node. Nothing here touches raw
//! document text; callers only build a tree for a document that parsed.

use serde_json::Value;

/// Nesting levels expanded by default (root and its direct children)
pub const DEFAULT_EXPANDED_DEPTH: usize = 2;

/// Longest string preview before truncation
const PREVIEW_CHARS: usize = 32;

/// JSON node type, decoupled from presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Object,
    Array,
    String,
    Number,
    Bool,
    Null,
}

impl NodeKind {
    fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => NodeKind::Object,
            Value::Array(_) => NodeKind::Array,
            Value::String(_) => NodeKind::String,
            Value::Number(_) => NodeKind::Number,
            Value::Bool(_) => NodeKind::Bool,
            Value::Null => NodeKind::Null,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, NodeKind::Object | NodeKind::Array)
    }
}

/// One collapsible node of the tree
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Key name, `[index]` for array elements, `$` for the root
    pub name: String,
    pub kind: NodeKind,
    /// Short value preview; container summaries use `{N keys}` / `[N items]`
    pub preview: String,
    pub depth: usize,
    pub expanded: bool,
    pub child_count: usize,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Build the tree for a parsed value with the default expansion depth
    pub fn build(value: &Value) -> Self {
        Self::build_with_depth(value, DEFAULT_EXPANDED_DEPTH)
    }

    /// Build the tree with the first `expanded_depth` levels expanded
    pub fn build_with_depth(value: &Value, expanded_depth: usize) -> Self {
        Self::from_value("$", value, 0, expanded_depth)
    }

    fn from_value(name: &str, value: &Value, depth: usize, expanded_depth: usize) -> Self {
        let children: Vec<TreeNode> = match value {
            Value::Object(map) => map
                .iter()
                .map(|(k, v)| Self::from_value(k, v, depth + 1, expanded_depth))
                .collect(),
            Value::Array(arr) => arr
                .iter()
                .enumerate()
                .map(|(i, v)| Self::from_value(&format!("[{}]", i), v, depth + 1, expanded_depth))
                .collect(),
            _ => Vec::new(),
        };
        Self {
            name: name.to_string(),
            kind: NodeKind::of(value),
            preview: preview_of(value),
            depth,
            expanded: depth < expanded_depth,
            child_count: children.len(),
            children,
        }
    }

    /// Toggle the expanded flag of the node addressed by a child-name path
    /// (empty path toggles the root). Returns false if the path misses.
    pub fn toggle(&mut self, path: &[&str]) -> bool {
        match path.split_first() {
            None => {
                if self.kind.is_container() {
                    self.expanded = !self.expanded;
                    true
                } else {
                    false
                }
            }
            Some((head, rest)) => self
                .children
                .iter_mut()
                .find(|c| c.name == *head)
                .map(|c| c.toggle(rest))
                .unwrap_or(false),
        }
    }

    /// Render the tree as indented text lines, descending only into
    /// expanded containers; collapsed containers show their summary.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        out.push_str(&"  ".repeat(self.depth));
        out.push_str(&self.name);
        out.push_str(": ");
        if self.kind.is_container() && self.expanded {
            out.push_str(match self.kind {
                NodeKind::Object => "{",
                NodeKind::Array => "[",
                _ => unreachable!(),
            });
            out.push('\n');
            for child in &self.children {
                child.render_into(out);
            }
            out.push_str(&"  ".repeat(self.depth));
            out.push_str(match self.kind {
                NodeKind::Object => "}",
                NodeKind::Array => "]",
                _ => unreachable!(),
            });
            out.push('\n');
        } else {
            out.push_str(&self.preview);
            out.push('\n');
        }
    }
}

/// Short preview text for a value: quoted/truncated strings, literal
/// scalars, and count summaries for containers.
fn preview_of(value: &Value) -> String {
    match value {
        Value::String(s) => {
            if s.chars().count() > PREVIEW_CHARS {
                let truncated: String = s.chars().take(PREVIEW_CHARS).collect();
                format!("\"{}...\"", truncated)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Object(m) => format!("{{{} keys}}", m.len()),
        Value::Array(a) => format!("[{} items]", a.len()),
    }
}
