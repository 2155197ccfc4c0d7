//! Stanza Interchange Codec
//!
//! Bidirectional conversion between quiz-question artifacts and the flat,
//! spreadsheet-compatible record format of the external authoring tool.
//!
//! # Core Concepts
//!
//! - [`TabularRow`]: the flat record (`Type, Question, Answer1..AnswerN,
//!   CorrectAnswer, CorrectFeedback, IncorrectFeedback`)
//! - [`import_records`]: rows -> artifacts, row failures isolated as
//!   [`RowError`]s — one bad row never blocks a batch
//! - [`export_records`]: artifacts -> rows through the plain-text
//!   projection (documented lossy policy)
//!
//! Both codec functions are synchronous, pure, and storage-free. Importing
//! an export reproduces question form, answer count, correct-answer
//! positions, and plain-text content — never rich-text formatting.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod error;
mod export;
mod import;
mod record;

// Re-exports
pub use error::{RowError, RowErrorKind};
pub use export::export_records;
pub use import::{import_records, ImportOutcome};
pub use record::{form_label, parse_form_label, TabularRow, SHEET_ANSWER_COLUMNS};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
