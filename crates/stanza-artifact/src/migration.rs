//! Migration engine
//!
//! Upgrades artifact payloads from older schema versions to the current one.
//! Per type, the registered steps form a state machine whose states are
//! version strings and whose transitions are pure functions over the opaque
//! payload value. Migrations run on read: every storage read path passes
//! artifacts through [`MigrationEngine::resolve_to_current`] before any
//! caller sees them, and write paths reject non-current versions instead.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::envelope::{ArtifactPayload, RawArtifact, SchemaVersion};
use crate::error::MigrationError;
use crate::question::{legacy, QuizQuestion};
use crate::registry::TypeRegistry;

/// Pure single-step payload migration
pub type MigrationFn = fn(JsonValue) -> Result<JsonValue, MigrationError>;

/// One registered transition
#[derive(Clone)]
struct MigrationStep {
    to: SchemaVersion,
    run: MigrationFn,
}

/// Registry-backed migration engine
///
/// Fails fast on version gaps: a missing transition surfaces a
/// [`MigrationError::MissingStep`] naming the gap, never a silent skip or a
/// guessed payload.
pub struct MigrationEngine {
    registry: Arc<TypeRegistry>,
    steps: HashMap<(String, String), MigrationStep>,
}

impl std::fmt::Debug for MigrationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MigrationEngine")
            .field("steps", &self.steps.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl MigrationEngine {
    /// Engine with no registered steps
    #[must_use]
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self {
            registry,
            steps: HashMap::new(),
        }
    }

    /// Engine with the built-in steps
    ///
    /// Registers `quiz-question` `1.0` -> `2.0`.
    #[must_use]
    pub fn with_defaults(registry: Arc<TypeRegistry>) -> Self {
        let mut engine = Self::new(registry);
        engine.register(
            QuizQuestion::TYPE_ID,
            legacy::VERSION,
            QuizQuestion::CURRENT_VERSION,
            legacy::migrate_v1_to_v2,
        );
        engine
    }

    /// Register a single-version transition for a type
    pub fn register(&mut self, type_id: &str, from: &str, to: &str, run: MigrationFn) {
        self.steps.insert(
            (type_id.to_string(), from.to_string()),
            MigrationStep {
                to: SchemaVersion::new(to),
                run,
            },
        );
    }

    /// Number of registered steps
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether no steps are registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Shared registry this engine resolves against
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    /// Bring an artifact to its type's current schema version
    ///
    /// Applies the single next-version step repeatedly until the version
    /// equals the type's current version. Idempotent: an already-current
    /// artifact is returned unchanged. The migrated payload is validated at
    /// the target version before being returned.
    ///
    /// # Errors
    /// - [`MigrationError::UnknownType`] for unregistered tags
    /// - [`MigrationError::MissingStep`] naming the version gap
    /// - [`MigrationError::StepFailed`] if a step rejects the payload
    /// - [`MigrationError::InvalidResult`] if the final payload fails
    ///   validation
    /// - [`MigrationError::NonConverging`] if the chain cannot terminate
    pub fn resolve_to_current(&self, artifact: RawArtifact) -> Result<RawArtifact, MigrationError> {
        let current = self
            .registry
            .current_version(&artifact.type_id)
            .ok_or_else(|| MigrationError::UnknownType(artifact.type_id.clone()))?
            .clone();

        if artifact.schema_version == current {
            return Ok(artifact);
        }

        let mut artifact = artifact;
        // Each registered step can fire at most once on a converging chain
        let max_hops = self.steps.len();
        let mut hops = 0usize;

        while artifact.schema_version != current {
            if hops >= max_hops {
                return Err(MigrationError::NonConverging {
                    type_id: artifact.type_id,
                    version: artifact.schema_version,
                });
            }
            let key = (
                artifact.type_id.clone(),
                artifact.schema_version.as_str().to_string(),
            );
            let step = self
                .steps
                .get(&key)
                .ok_or_else(|| MigrationError::MissingStep {
                    type_id: artifact.type_id.clone(),
                    from: artifact.schema_version.clone(),
                    to: current.clone(),
                })?;

            tracing::debug!(
                artifact = %artifact.id,
                type_id = %artifact.type_id,
                from = %artifact.schema_version,
                to = %step.to,
                "migrating artifact payload"
            );

            artifact.data = (step.run)(std::mem::take(&mut artifact.data))?;
            artifact.schema_version = step.to.clone();
            hops += 1;
        }

        self.registry
            .validate(&artifact)
            .map_err(|source| MigrationError::InvalidResult {
                type_id: artifact.type_id.clone(),
                version: artifact.schema_version.clone(),
                source,
            })?;

        Ok(artifact)
    }
}
