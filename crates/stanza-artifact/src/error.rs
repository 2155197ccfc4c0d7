//! Error types for the artifact model
//!
//! Two error families live here:
//! - [`ValidationError`]: malformed payloads and contract violations —
//!   recoverable, surfaced to the caller, never auto-corrected
//! - [`MigrationError`]: version gaps and bad migration output — fatal for
//!   the artifact being read; no partial or guessed migrations

use crate::envelope::SchemaVersion;
use stanza_document::DocumentError;

/// Malformed artifact payload or contract violation
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// Artifact type tag is not registered
    #[error("unknown artifact type: {0}")]
    UnknownType(String),

    /// No validator registered for this (type, version) pair
    #[error("unknown schema version {version} for type {type_id}")]
    UnknownVersion {
        type_id: String,
        version: SchemaVersion,
    },

    /// Type tag does not match the expected payload type
    #[error("artifact type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Write attempted with a non-current schema version
    #[error("schema version {found} is not current ({current}) for type {type_id}")]
    StaleSchemaVersion {
        type_id: String,
        found: SchemaVersion,
        current: SchemaVersion,
    },

    /// Payload did not decode into the registered shape
    #[error("malformed {type_id} payload: {source}")]
    MalformedPayload {
        type_id: String,
        #[source]
        source: serde_json::Error,
    },

    /// Payload could not be encoded to its persisted shape
    #[error("failed to encode {type_id} payload: {source}")]
    Serialization {
        type_id: String,
        #[source]
        source: serde_json::Error,
    },

    /// Payload-specific invariant violated
    #[error("invariant violated: {0}")]
    Invariant(String),

    /// Embedded rich-text document is structurally invalid
    #[error("invalid document: {0}")]
    Document(#[from] DocumentError),
}

/// Failure to bring an artifact payload to the current schema version
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// Artifact type tag is not registered
    #[error("unknown artifact type: {0}")]
    UnknownType(String),

    /// No registered transition covers the version gap
    #[error("no migration registered for {type_id} from {from} toward {to}")]
    MissingStep {
        type_id: String,
        from: SchemaVersion,
        to: SchemaVersion,
    },

    /// A registered step rejected the payload
    #[error("migration step failed for {type_id} at {from}: {reason}")]
    StepFailed {
        type_id: String,
        from: SchemaVersion,
        reason: String,
    },

    /// Migrated payload failed validation at the target version
    #[error("migration for {type_id} produced invalid {version} payload: {source}")]
    InvalidResult {
        type_id: String,
        version: SchemaVersion,
        #[source]
        source: ValidationError,
    },

    /// Step chain revisited a version without reaching current
    #[error("migration chain for {type_id} did not converge at {version}")]
    NonConverging {
        type_id: String,
        version: SchemaVersion,
    },
}
