//! Stanza Artifact Model
//!
//! Typed, schema-versioned content records with audit metadata.
//!
//! # Core Concepts
//!
//! - [`Artifact<P>`]: typed envelope around an [`ArtifactPayload`]
//! - [`RawArtifact`]: type-erased persisted shape (opaque `data` value)
//! - [`TypeRegistry`]: runtime validators per `(type, schemaVersion)` pair
//! - [`MigrationEngine`]: single-step payload upgrades, applied on read
//! - [`Project`] / [`Link`]: ownership and relationship records
//!
//! # Example
//!
//! ```rust
//! use stanza_artifact::{Answer, Artifact, ProjectId, QuestionForm, QuizQuestion};
//! use stanza_document::Document;
//!
//! let question = QuizQuestion::new(
//!     QuestionForm::TrueFalse,
//!     Document::from_plain_text("Sky is blue."),
//!     vec![
//!         Answer::correct(Document::from_plain_text("True")),
//!         Answer::new(Document::from_plain_text("False")),
//!     ],
//! );
//! let artifact = Artifact::new(ProjectId::new(), question, "alice").unwrap();
//! let raw = artifact.into_raw().unwrap();
//! assert_eq!(raw.type_id, "quiz-question");
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod bank;
mod envelope;
mod error;
mod id;
mod link;
mod migration;
mod project;
mod question;
mod registry;

// Re-exports
pub use bank::{BankSettings, QuestionBank};
pub use envelope::{Artifact, ArtifactMetadata, ArtifactPayload, RawArtifact, SchemaVersion};
pub use error::{MigrationError, ValidationError};
pub use id::{AnswerId, ArtifactId, LinkId, ProjectId};
pub use link::{Link, Relationship};
pub use migration::{MigrationEngine, MigrationFn};
pub use project::Project;
pub use question::{legacy, Answer, Feedback, QuestionForm, QuizQuestion, QuizSettings};
pub use registry::{TypeDescriptor, TypeRegistry, ValidatorFn};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
