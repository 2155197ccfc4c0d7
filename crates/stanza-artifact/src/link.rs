//! Directional links between artifacts
//!
//! Links are plain relationship records. They are not cascaded: deleting an
//! artifact leaves links referencing it in place, and cleaning those up is
//! the calling collaborator's responsibility.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::id::{ArtifactId, LinkId, ProjectId};

/// Closed set of link relationships
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    /// Source contains target (bank contains question)
    Contains,
    /// Source assesses target
    Assesses,
    /// Source was derived from target
    DerivedFrom,
}

/// Directional relationship record between two artifacts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// Unique identifier
    pub id: LinkId,
    /// Owning project
    pub project_id: ProjectId,
    /// Source artifact
    pub source_id: ArtifactId,
    /// Target artifact
    pub target_id: ArtifactId,
    /// Relationship kind
    pub relationship: Relationship,
    /// Author
    pub created_by: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Create a link record
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        source_id: ArtifactId,
        target_id: ArtifactId,
        relationship: Relationship,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            id: LinkId::new(),
            project_id,
            source_id,
            target_id,
            relationship,
            created_by: created_by.into(),
            created_at: Utc::now(),
        }
    }
}
