//! Document root and plain-text projection
//!
//! A [`Document`] is the tree-structured rich-text value used for every
//! prose field (prompts, answer text, feedback). Documents are immutable
//! value objects: every edit produces a new `Document`.
//!
//! # Lossy conversion policy
//!
//! [`Document::to_plain_text`] and [`Document::from_plain_text`] are *not*
//! mutual inverses. Projecting to plain text discards all marks and block
//! structure, and lifting plain text back only ever produces flat
//! paragraphs. `from_plain_text(to_plain_text(doc))` therefore loses any
//! formatting and any lists/headings the original had. This asymmetry is
//! the accepted contract of the interchange boundary, not a defect.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::node::{DocumentError, Node};

/// The fixed root kind of every document
pub const ROOT_KIND: &str = "doc";

/// Rich-text document tree
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Ordered top-level block nodes
    #[serde(default)]
    pub content: Vec<Node>,
}

impl Document {
    /// Create an empty document with no nodes
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a document from top-level nodes
    #[inline]
    #[must_use]
    pub fn new(content: Vec<Node>) -> Self {
        Self { content }
    }

    /// Whether the document holds no nodes
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Check structural invariants of the whole tree
    ///
    /// # Errors
    /// Returns the first [`DocumentError`] found in depth-first order
    pub fn validate(&self) -> Result<(), DocumentError> {
        for node in &self.content {
            node.validate()?;
        }
        Ok(())
    }

    /// Lift plain text into a document
    ///
    /// One paragraph node per input line; each non-empty line becomes a
    /// single unformatted text run. Empty lines become empty paragraphs.
    /// Windows line endings are tolerated.
    #[must_use]
    pub fn from_plain_text(text: &str) -> Self {
        let content = text
            .split('\n')
            .map(|line| {
                let line = line.strip_suffix('\r').unwrap_or(line);
                if line.is_empty() {
                    Node::paragraph(Vec::new())
                } else {
                    Node::paragraph(vec![Node::text(line)])
                }
            })
            .collect();
        Self { content }
    }

    /// Project the document to plain text
    ///
    /// Depth-first concatenation of all text runs; block-level nodes are
    /// separated by a single line break; marks are discarded.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        let mut lines = Vec::new();
        for node in &self.content {
            collect_block(node, &mut lines);
        }
        lines.join("\n")
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Self::from_plain_text(text)
    }
}

/// Append the lines produced by one block-level node
fn collect_block(node: &Node, lines: &mut Vec<String>) {
    if node.is_inline() {
        // Stray inline node at block level still contributes its own line
        let mut line = String::new();
        collect_inline(node, &mut line);
        lines.push(line);
        return;
    }
    let children = node.content.as_deref().unwrap_or(&[]);
    if children.iter().all(Node::is_inline) {
        let mut line = String::new();
        for child in children {
            collect_inline(child, &mut line);
        }
        lines.push(line);
    } else {
        for child in children {
            collect_block(child, lines);
        }
    }
}

/// Append text runs of an inline subtree to the current line
fn collect_inline(node: &Node, line: &mut String) {
    if let Some(text) = &node.text {
        line.push_str(text);
    }
    for child in node.content.as_deref().unwrap_or(&[]) {
        collect_inline(child, line);
    }
}
