//! Document nodes and formatting marks
//!
//! Defines [`Node`], [`NodeKind`], [`Mark`] and [`MarkKind`] plus structural
//! validation. Nodes are plain value objects: every edit builds new nodes.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Node kinds in the document tree
///
/// `Text` is the only inline kind; every other kind is block-level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Block of inline content
    Paragraph,
    /// Heading block (level in `attrs`)
    Heading,
    /// Unordered list of list items
    BulletList,
    /// Ordered list of list items
    OrderedList,
    /// Single list entry
    ListItem,
    /// Terminal text run
    Text,
}

impl NodeKind {
    /// Whether this kind is inline (text-bearing)
    #[inline]
    #[must_use]
    pub fn is_inline(self) -> bool {
        matches!(self, Self::Text)
    }

    /// Whether this kind is block-level
    #[inline]
    #[must_use]
    pub fn is_block(self) -> bool {
        !self.is_inline()
    }
}

/// Formatting mark kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MarkKind {
    Bold,
    Italic,
    Underline,
    Strike,
    Code,
    Link,
}

/// Formatting mark applied to a text run
///
/// Marks carry optional key-value attributes (e.g. `href` on a link).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Mark {
    /// Mark kind
    pub kind: MarkKind,

    /// Kind-specific attributes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Map<String, JsonValue>>,
}

impl Mark {
    /// Create a mark with no attributes
    #[inline]
    #[must_use]
    pub fn new(kind: MarkKind) -> Self {
        Self { kind, attrs: None }
    }

    /// Bold mark
    #[inline]
    #[must_use]
    pub fn bold() -> Self {
        Self::new(MarkKind::Bold)
    }

    /// Italic mark
    #[inline]
    #[must_use]
    pub fn italic() -> Self {
        Self::new(MarkKind::Italic)
    }

    /// Link mark with an `href` attribute
    #[must_use]
    pub fn link(href: impl Into<String>) -> Self {
        let mut attrs = Map::new();
        attrs.insert("href".to_string(), JsonValue::String(href.into()));
        Self {
            kind: MarkKind::Link,
            attrs: Some(attrs),
        }
    }
}

/// A node in the document tree
///
/// # Invariants
/// - A node has either `text` or `content`, never neither
/// - Marks apply only to text-bearing nodes
/// - `Text` nodes carry text and never children; block nodes never carry text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Node kind
    pub kind: NodeKind,

    /// Ordered child nodes (block nodes only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<Node>>,

    /// Literal text (terminal nodes only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Formatting marks (text-bearing nodes only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks: Option<Vec<Mark>>,

    /// Kind-specific attributes (e.g. heading level)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Map<String, JsonValue>>,
}

impl Node {
    /// Unformatted text run
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Text,
            content: None,
            text: Some(text.into()),
            marks: None,
            attrs: None,
        }
    }

    /// Text run with formatting marks
    #[must_use]
    pub fn text_with_marks(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Self {
            kind: NodeKind::Text,
            content: None,
            text: Some(text.into()),
            marks: Some(marks),
            attrs: None,
        }
    }

    /// Paragraph with inline content
    #[must_use]
    pub fn paragraph(content: Vec<Node>) -> Self {
        Self {
            kind: NodeKind::Paragraph,
            content: Some(content),
            text: None,
            marks: None,
            attrs: None,
        }
    }

    /// Heading with a level attribute
    #[must_use]
    pub fn heading(level: u8, content: Vec<Node>) -> Self {
        let mut attrs = Map::new();
        attrs.insert("level".to_string(), JsonValue::from(level));
        Self {
            kind: NodeKind::Heading,
            content: Some(content),
            text: None,
            marks: None,
            attrs: Some(attrs),
        }
    }

    /// Bullet list of items
    #[must_use]
    pub fn bullet_list(items: Vec<Node>) -> Self {
        Self {
            kind: NodeKind::BulletList,
            content: Some(items),
            text: None,
            marks: None,
            attrs: None,
        }
    }

    /// Ordered list of items
    #[must_use]
    pub fn ordered_list(items: Vec<Node>) -> Self {
        Self {
            kind: NodeKind::OrderedList,
            content: Some(items),
            text: None,
            marks: None,
            attrs: None,
        }
    }

    /// List item wrapping block content
    #[must_use]
    pub fn list_item(content: Vec<Node>) -> Self {
        Self {
            kind: NodeKind::ListItem,
            content: Some(content),
            text: None,
            marks: None,
            attrs: None,
        }
    }

    /// Whether this node is an inline text run
    #[inline]
    #[must_use]
    pub fn is_inline(&self) -> bool {
        self.kind.is_inline()
    }

    /// Check structural invariants recursively
    ///
    /// # Errors
    /// Returns the first violation found in depth-first order
    pub fn validate(&self) -> Result<(), DocumentError> {
        if self.text.is_none() && self.content.is_none() {
            return Err(DocumentError::EmptyNode { kind: self.kind });
        }
        if self.marks.is_some() && self.text.is_none() {
            return Err(DocumentError::MarksOnBlockNode { kind: self.kind });
        }
        if self.kind.is_inline() {
            if self.content.is_some() {
                return Err(DocumentError::TextNodeWithChildren);
            }
        } else if self.text.is_some() {
            return Err(DocumentError::TextOnBlockNode { kind: self.kind });
        }
        for child in self.content.as_deref().unwrap_or(&[]) {
            child.validate()?;
        }
        Ok(())
    }
}

/// Structural document violations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    /// Node has neither text nor content
    #[error("{kind:?} node has neither text nor content")]
    EmptyNode { kind: NodeKind },

    /// Marks attached to a non-text node
    #[error("marks applied to non-text {kind:?} node")]
    MarksOnBlockNode { kind: NodeKind },

    /// Literal text on a block-level node
    #[error("literal text on block-level {kind:?} node")]
    TextOnBlockNode { kind: NodeKind },

    /// Text node carrying children
    #[error("text node cannot have child content")]
    TextNodeWithChildren,
}
