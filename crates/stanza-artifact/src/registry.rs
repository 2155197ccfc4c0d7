//! Type registry
//!
//! Maps each artifact type tag to its current schema version and one payload
//! validator per known `(type, schemaVersion)` pair. The compile-time side
//! of type discrimination is the [`ArtifactPayload`] impls; the registry is
//! the runtime fallback for data arriving from storage.
//!
//! Registration is open: a new payload type is added by registering it here,
//! without touching the core.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value as JsonValue;

use crate::bank::QuestionBank;
use crate::envelope::{ArtifactPayload, RawArtifact, SchemaVersion};
use crate::error::ValidationError;
use crate::question::{legacy, QuizQuestion};

/// Payload validator for one `(type, schemaVersion)` pair
pub type ValidatorFn = Box<dyn Fn(&JsonValue) -> Result<(), ValidationError> + Send + Sync>;

/// Everything the registry knows about one artifact type
pub struct TypeDescriptor {
    type_id: String,
    current_version: SchemaVersion,
    validators: HashMap<String, ValidatorFn>,
    schema: Option<schemars::schema::RootSchema>,
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_id", &self.type_id)
            .field("current_version", &self.current_version)
            .field("versions", &self.validators.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl TypeDescriptor {
    /// Stable type tag
    #[inline]
    #[must_use]
    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    /// Current schema version for this type
    #[inline]
    #[must_use]
    pub fn current_version(&self) -> &SchemaVersion {
        &self.current_version
    }

    /// JSON schema of the current payload shape, if registered
    #[inline]
    #[must_use]
    pub fn schema(&self) -> Option<&schemars::schema::RootSchema> {
        self.schema.as_ref()
    }
}

/// Registry of artifact types and their payload validators
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: HashMap<String, TypeDescriptor>,
}

impl TypeRegistry {
    /// Create an empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    /// Registry with both built-in types
    ///
    /// Registers `quiz-question` (current `2.0`, legacy `1.0`) and
    /// `question-bank` (current `1.0`).
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register::<QuizQuestion>();
        registry.register_version(
            QuizQuestion::TYPE_ID,
            legacy::VERSION,
            Box::new(|data| {
                let payload: legacy::QuizQuestionV1 = serde_json::from_value(data.clone())
                    .map_err(|source| ValidationError::MalformedPayload {
                        type_id: QuizQuestion::TYPE_ID.to_string(),
                        source,
                    })?;
                payload.validate()
            }),
        );
        registry.register::<QuestionBank>();
        registry
    }

    /// Register a payload type at its current version
    ///
    /// The validator decodes the payload and checks its invariants.
    /// Re-registering a type replaces its descriptor.
    pub fn register<P: ArtifactPayload>(&mut self) {
        let mut descriptor = TypeDescriptor {
            type_id: P::TYPE_ID.to_string(),
            current_version: P::current_version(),
            validators: HashMap::new(),
            schema: P::schema(),
        };
        descriptor.validators.insert(
            P::CURRENT_VERSION.to_string(),
            Box::new(|data: &JsonValue| {
                let payload: P = serde_json::from_value(data.clone()).map_err(|source| {
                    ValidationError::MalformedPayload {
                        type_id: P::TYPE_ID.to_string(),
                        source,
                    }
                })?;
                payload.validate()
            }),
        );
        self.types.insert(P::TYPE_ID.to_string(), descriptor);
    }

    /// Register a validator for an additional (usually legacy) version
    ///
    /// No-op if the type itself has not been registered first.
    pub fn register_version(&mut self, type_id: &str, version: &str, validator: ValidatorFn) {
        if let Some(descriptor) = self.types.get_mut(type_id) {
            descriptor.validators.insert(version.to_string(), validator);
        }
    }

    /// Whether a type tag is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, type_id: &str) -> bool {
        self.types.contains_key(type_id)
    }

    /// Descriptor for a type tag
    #[inline]
    #[must_use]
    pub fn descriptor(&self, type_id: &str) -> Option<&TypeDescriptor> {
        self.types.get(type_id)
    }

    /// Current schema version for a type tag
    #[inline]
    #[must_use]
    pub fn current_version(&self, type_id: &str) -> Option<&SchemaVersion> {
        self.types.get(type_id).map(TypeDescriptor::current_version)
    }

    /// Whether an artifact sits at its type's current version
    #[must_use]
    pub fn is_current(&self, artifact: &RawArtifact) -> bool {
        self.current_version(&artifact.type_id)
            .is_some_and(|current| *current == artifact.schema_version)
    }

    /// Registered type tags
    #[must_use]
    pub fn type_ids(&self) -> Vec<&str> {
        self.types.keys().map(String::as_str).collect()
    }

    /// Number of registered types
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Validate an artifact's payload against its `(type, version)` shape
    ///
    /// # Errors
    /// - [`ValidationError::UnknownType`] if the tag is unregistered
    /// - [`ValidationError::UnknownVersion`] if no validator covers the
    ///   artifact's version
    /// - decode/invariant failures from the registered validator
    pub fn validate(&self, artifact: &RawArtifact) -> Result<(), ValidationError> {
        let descriptor = self
            .types
            .get(&artifact.type_id)
            .ok_or_else(|| ValidationError::UnknownType(artifact.type_id.clone()))?;
        let validator = descriptor
            .validators
            .get(artifact.schema_version.as_str())
            .ok_or_else(|| ValidationError::UnknownVersion {
                type_id: artifact.type_id.clone(),
                version: artifact.schema_version.clone(),
            })?;
        validator(&artifact.data)
    }

    /// Write-path gate: version must be current, payload must validate
    ///
    /// # Errors
    /// [`ValidationError::StaleSchemaVersion`] when the version lags, plus
    /// every condition of [`TypeRegistry::validate`]
    pub fn validate_current(&self, artifact: &RawArtifact) -> Result<(), ValidationError> {
        let descriptor = self
            .types
            .get(&artifact.type_id)
            .ok_or_else(|| ValidationError::UnknownType(artifact.type_id.clone()))?;
        if *descriptor.current_version() != artifact.schema_version {
            return Err(ValidationError::StaleSchemaVersion {
                type_id: artifact.type_id.clone(),
                found: artifact.schema_version.clone(),
                current: descriptor.current_version().clone(),
            });
        }
        self.validate(artifact)
    }
}
