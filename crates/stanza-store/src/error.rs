//! Storage error taxonomy
//!
//! Not-found on a read path is `Ok(None)`/empty, never an error; not-found
//! on update/delete and constraint violations surface here. The contract
//! never retries — retry/backoff belongs to the concrete adapter or its
//! caller.

use stanza_artifact::{MigrationError, ValidationError};

/// Entity kind for not-found reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Project,
    Artifact,
    Link,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Project => "project",
            Self::Artifact => "artifact",
            Self::Link => "link",
        };
        f.write_str(name)
    }
}

/// Storage adapter failure
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Update/delete target does not exist
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    /// Write rejected by artifact validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Read failed to resolve the artifact to its current schema
    #[error(transparent)]
    Migration(#[from] MigrationError),

    /// Backend-level failure, opaque cause wrapped and re-surfaced
    #[error("storage backend failure: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wrap a backend fault
    #[must_use]
    pub fn backend(cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(cause))
    }

    /// Not-found constructor
    #[must_use]
    pub fn not_found(kind: EntityKind, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_kind_and_id() {
        let err = StoreError::not_found(EntityKind::Project, "p-123");
        assert_eq!(err.to_string(), "project not found: p-123");
    }

    #[test]
    fn validation_error_is_transparent() {
        let err = StoreError::from(ValidationError::UnknownType("mystery".to_string()));
        assert!(err.to_string().contains("unknown artifact type"));
    }

    #[test]
    fn backend_wraps_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "socket dropped");
        let err = StoreError::backend(io);
        assert!(err.to_string().contains("storage backend failure"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
