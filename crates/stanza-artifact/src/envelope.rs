//! Artifact envelope
//!
//! [`Artifact<P>`] is the typed envelope callers work with; [`RawArtifact`]
//! is the type-erased shape the storage boundary speaks. Conversions between
//! the two are the per-type codec: encoding serializes the payload into an
//! opaque `data` value, decoding checks the type tag and re-validates shape.
//!
//! # Invariants
//! - `type` is fixed at creation and never reassigned
//! - `schema_version` only advances, and only through the migration engine
//! - `metadata.modified_at` is monotonically non-decreasing across writes

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

use crate::error::ValidationError;
use crate::id::{ArtifactId, ProjectId};

/// Schema version tag for an artifact payload
///
/// Versions are opaque strings ordered only by the registered migration
/// chain; nothing parses them as semver.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct SchemaVersion(String);

impl SchemaVersion {
    /// Create a version tag
    #[inline]
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    /// Version tag as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SchemaVersion {
    fn from(version: &str) -> Self {
        Self::new(version)
    }
}

impl PartialEq<str> for SchemaVersion {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SchemaVersion {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Audit metadata carried by every artifact
///
/// All fields are required and never null. `created_by`/`created_at` are
/// fixed at creation; the storage adapter preserves them across updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactMetadata {
    /// Author at creation time
    pub created_by: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last-write timestamp, monotonically non-decreasing
    pub modified_at: DateTime<Utc>,
    /// Author of the last write
    pub modified_by: String,
}

impl ArtifactMetadata {
    /// Fresh metadata for a newly created artifact
    #[must_use]
    pub fn new(author: impl Into<String>) -> Self {
        let author = author.into();
        let now = Utc::now();
        Self {
            created_by: author.clone(),
            created_at: now,
            modified_at: now,
            modified_by: author,
        }
    }

    /// Record a write
    ///
    /// `modified_at` never regresses, even under clock skew.
    pub fn touch(&mut self, by: impl Into<String>) {
        self.modified_at = Utc::now().max(self.modified_at);
        self.modified_by = by.into();
    }
}

/// Trait implemented by every registered payload type
///
/// A payload supplies its stable type tag, the current schema version for
/// that tag, its invariants, and (optionally) a JSON schema. Payloads are
/// encoded/decoded through serde at the storage boundary, so adding a type
/// never touches the core.
pub trait ArtifactPayload:
    Serialize + DeserializeOwned + Clone + fmt::Debug + PartialEq + Send + Sync + 'static
{
    /// Stable type tag
    ///
    /// Must be globally unique, lowercase, and never change once persisted
    /// data exists.
    const TYPE_ID: &'static str;

    /// Current schema version for this type
    const CURRENT_VERSION: &'static str;

    /// Check payload-specific invariants
    ///
    /// # Errors
    /// Returns the violated invariant; never auto-corrects
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    /// JSON schema for this payload, if available
    fn schema() -> Option<schemars::schema::RootSchema> {
        None
    }

    /// Current schema version as a tag
    #[must_use]
    fn current_version() -> SchemaVersion {
        SchemaVersion::new(Self::CURRENT_VERSION)
    }
}

/// Typed artifact envelope
///
/// The payload shape is known statically; the type tag and current schema
/// version come from the payload's [`ArtifactPayload`] impl.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(serialize = "P: Serialize", deserialize = "P: DeserializeOwned"))]
pub struct Artifact<P: ArtifactPayload> {
    /// Unique identifier
    pub id: ArtifactId,
    /// Owning project
    pub project_id: ProjectId,
    /// Schema version of `payload`
    pub schema_version: SchemaVersion,
    /// Audit metadata
    pub metadata: ArtifactMetadata,
    /// Typed payload
    pub payload: P,
}

impl<P: ArtifactPayload> Artifact<P> {
    /// Create a new artifact at the current schema version
    ///
    /// # Errors
    /// Returns [`ValidationError`] if the payload violates its invariants
    pub fn new(
        project_id: ProjectId,
        payload: P,
        author: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        payload.validate()?;
        Ok(Self {
            id: ArtifactId::new(),
            project_id,
            schema_version: P::current_version(),
            metadata: ArtifactMetadata::new(author),
            payload,
        })
    }

    /// Stable type tag of this artifact's payload
    #[inline]
    #[must_use]
    pub fn type_id() -> &'static str {
        P::TYPE_ID
    }

    /// Encode into the type-erased persisted shape
    ///
    /// # Errors
    /// Returns [`ValidationError::Serialization`] if the payload cannot be
    /// represented as JSON
    pub fn into_raw(self) -> Result<RawArtifact, ValidationError> {
        let data = serde_json::to_value(&self.payload).map_err(|source| {
            ValidationError::Serialization {
                type_id: P::TYPE_ID.to_string(),
                source,
            }
        })?;
        Ok(RawArtifact {
            id: self.id,
            project_id: self.project_id,
            type_id: P::TYPE_ID.to_string(),
            schema_version: self.schema_version,
            metadata: self.metadata,
            data,
        })
    }

    /// Decode from the type-erased persisted shape
    ///
    /// # Errors
    /// - [`ValidationError::TypeMismatch`] if the tag is not `P::TYPE_ID`
    /// - [`ValidationError::MalformedPayload`] if `data` does not decode
    pub fn from_raw(raw: RawArtifact) -> Result<Self, ValidationError> {
        if raw.type_id != P::TYPE_ID {
            return Err(ValidationError::TypeMismatch {
                expected: P::TYPE_ID.to_string(),
                actual: raw.type_id,
            });
        }
        let payload: P =
            serde_json::from_value(raw.data).map_err(|source| ValidationError::MalformedPayload {
                type_id: P::TYPE_ID.to_string(),
                source,
            })?;
        Ok(Self {
            id: raw.id,
            project_id: raw.project_id,
            schema_version: raw.schema_version,
            metadata: raw.metadata,
            payload,
        })
    }
}

/// Type-erased artifact as persisted by storage adapters
///
/// `data` is opaque here; its shape is pinned by `(type, schema_version)`
/// and checked by the type registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArtifact {
    /// Unique identifier
    pub id: ArtifactId,
    /// Owning project
    pub project_id: ProjectId,
    /// Stable type tag
    #[serde(rename = "type")]
    pub type_id: String,
    /// Schema version of `data`
    pub schema_version: SchemaVersion,
    /// Audit metadata
    pub metadata: ArtifactMetadata,
    /// Opaque payload
    pub data: JsonValue,
}

impl RawArtifact {
    /// Structural type guard on the tag
    #[inline]
    #[must_use]
    pub fn is_type(&self, type_id: &str) -> bool {
        self.type_id == type_id
    }

    /// Type guard against a statically known payload type
    #[inline]
    #[must_use]
    pub fn is_of_type<P: ArtifactPayload>(&self) -> bool {
        self.type_id == P::TYPE_ID
    }

    /// Decode the payload without consuming the envelope
    ///
    /// # Errors
    /// Same conditions as [`Artifact::from_raw`]
    pub fn decode_payload<P: ArtifactPayload>(&self) -> Result<P, ValidationError> {
        if !self.is_of_type::<P>() {
            return Err(ValidationError::TypeMismatch {
                expected: P::TYPE_ID.to_string(),
                actual: self.type_id.clone(),
            });
        }
        serde_json::from_value(self.data.clone()).map_err(|source| {
            ValidationError::MalformedPayload {
                type_id: P::TYPE_ID.to_string(),
                source,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // Minimal payload for envelope tests
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct NotePayload {
        body: String,
    }

    impl ArtifactPayload for NotePayload {
        const TYPE_ID: &'static str = "note";
        const CURRENT_VERSION: &'static str = "1.0";

        fn validate(&self) -> Result<(), ValidationError> {
            if self.body.is_empty() {
                return Err(ValidationError::Invariant("note body is empty".to_string()));
            }
            Ok(())
        }
    }

    fn note(body: &str) -> Artifact<NotePayload> {
        Artifact::new(
            ProjectId::new(),
            NotePayload {
                body: body.to_string(),
            },
            "alice",
        )
        .unwrap()
    }

    #[test]
    fn new_artifact_is_current_version() {
        let artifact = note("hello");
        assert_eq!(artifact.schema_version, NotePayload::current_version());
        assert_eq!(artifact.metadata.created_by, "alice");
        assert_eq!(artifact.metadata.created_at, artifact.metadata.modified_at);
    }

    #[test]
    fn new_artifact_rejects_invalid_payload() {
        let result = Artifact::new(
            ProjectId::new(),
            NotePayload {
                body: String::new(),
            },
            "alice",
        );
        assert!(matches!(result, Err(ValidationError::Invariant(_))));
    }

    #[test]
    fn raw_round_trip_preserves_everything() {
        let artifact = note("round trip");
        let raw = artifact.clone().into_raw().unwrap();
        assert_eq!(raw.type_id, "note");
        assert_eq!(raw.data, json!({"body": "round trip"}));

        let back = Artifact::<NotePayload>::from_raw(raw).unwrap();
        assert_eq!(back, artifact);
    }

    #[test]
    fn from_raw_rejects_wrong_type() {
        let mut raw = note("x").into_raw().unwrap();
        raw.type_id = "question-bank".to_string();
        let result = Artifact::<NotePayload>::from_raw(raw);
        assert!(matches!(result, Err(ValidationError::TypeMismatch { .. })));
    }

    #[test]
    fn from_raw_rejects_malformed_data() {
        let mut raw = note("x").into_raw().unwrap();
        raw.data = json!({"body": 42});
        let result = Artifact::<NotePayload>::from_raw(raw);
        assert!(matches!(
            result,
            Err(ValidationError::MalformedPayload { .. })
        ));
    }

    #[test]
    fn type_guards() {
        let raw = note("x").into_raw().unwrap();
        assert!(raw.is_type("note"));
        assert!(raw.is_of_type::<NotePayload>());
        assert!(!raw.is_type("quiz-question"));
    }

    #[test]
    fn touch_is_monotonic() {
        let mut metadata = ArtifactMetadata::new("alice");
        // Simulate an at-rest timestamp ahead of the wall clock
        metadata.modified_at = Utc::now() + chrono::Duration::hours(1);
        let before = metadata.modified_at;

        metadata.touch("bob");
        assert!(metadata.modified_at >= before);
        assert_eq!(metadata.modified_by, "bob");
        assert_eq!(metadata.created_by, "alice");
    }

    #[test]
    fn raw_artifact_wire_shape_is_camel_case() {
        let raw = note("wire").into_raw().unwrap();
        let json = serde_json::to_value(&raw).unwrap();
        assert!(json.get("projectId").is_some());
        assert!(json.get("schemaVersion").is_some());
        assert_eq!(json["type"], "note");
        assert!(json["metadata"].get("createdBy").is_some());
    }
}
