//! Stanza Document Model
//!
//! Tree-structured rich text used for all prose fields in Stanza content.
//!
//! # Core Concepts
//!
//! - [`Document`]: immutable rich-text tree with a fixed root kind
//! - [`Node`]: block or inline node (paragraphs, lists, headings, text runs)
//! - [`Mark`]: formatting applied to text runs (bold, italic, link, ...)
//!
//! Plain-text conversion is deliberately lossy in one direction: see the
//! module docs on [`document`] for the accepted policy.
//!
//! # Example
//!
//! ```rust
//! use stanza_document::Document;
//!
//! let doc = Document::from_plain_text("What color is the sky?");
//! assert_eq!(doc.to_plain_text(), "What color is the sky?");
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod document;
mod node;

pub use document::{Document, ROOT_KIND};
pub use node::{DocumentError, Mark, MarkKind, Node, NodeKind};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
