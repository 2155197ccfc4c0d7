//! Storage adapter contract
//!
//! The operation set any backing store must implement. This trait is the
//! entire boundary the rest of the system may use: no caller depends on
//! backend-specific query capability. Every method is async and may suspend
//! on I/O; each call is a single logical transaction from the caller's point
//! of view — no partial writes are visible to a concurrent reader.
//!
//! The contract defines no optimistic-concurrency detection: concurrent
//! `save_artifact` calls for the same id both succeed and the later write
//! wins. It also defines no retry or timeout policy; both belong to the
//! concrete adapter or its caller.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use stanza_artifact::{ArtifactId, Link, LinkId, Project, ProjectId, RawArtifact};

use crate::error::StoreError;

/// Input for creating a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    /// Display name
    pub name: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning user
    pub owner_id: String,
}

impl NewProject {
    /// Minimal input
    #[must_use]
    pub fn new(name: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            owner_id: owner_id.into(),
        }
    }

    /// With a description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial project update; absent fields are left unchanged
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    /// New display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProjectPatch {
    /// Patch only the name
    #[must_use]
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            description: None,
        }
    }
}

/// The storage adapter contract
///
/// Implementable over any backing store. Not-found on a read returns
/// `Ok(None)` or an empty collection, never an error; not-found on
/// update/delete surfaces [`StoreError::NotFound`].
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    /// All projects, in store order
    async fn projects(&self) -> Result<Vec<Project>, StoreError>;

    /// One project, or `None`
    async fn project(&self, id: ProjectId) -> Result<Option<Project>, StoreError>;

    /// Create a project
    async fn create_project(&self, input: NewProject) -> Result<Project, StoreError>;

    /// Apply a partial update and return the result
    ///
    /// # Errors
    /// [`StoreError::NotFound`] if the project does not exist
    async fn update_project(&self, id: ProjectId, patch: ProjectPatch)
        -> Result<Project, StoreError>;

    /// Delete a project, cascading to its artifacts and links
    ///
    /// This is the one cascade the contract mandates.
    ///
    /// # Errors
    /// [`StoreError::NotFound`] if the project does not exist
    async fn delete_project(&self, id: ProjectId) -> Result<(), StoreError>;

    /// Artifacts of a project, optionally filtered by type tag
    async fn artifacts(
        &self,
        project_id: ProjectId,
        type_filter: Option<&str>,
    ) -> Result<Vec<RawArtifact>, StoreError>;

    /// One artifact, or `None`
    async fn artifact(&self, id: ArtifactId) -> Result<Option<RawArtifact>, StoreError>;

    /// Upsert an artifact by id
    ///
    /// On update the original `created_by`/`created_at` are preserved even
    /// if the caller's object alters them, and `modified_at` is set to the
    /// current time (never regressing).
    ///
    /// # Errors
    /// [`StoreError::Validation`] if the payload is invalid or its
    /// `schema_version` is not current for its type
    async fn save_artifact(&self, artifact: RawArtifact) -> Result<(), StoreError>;

    /// Delete an artifact
    ///
    /// Does not cascade link cleanup; dangling links are the calling
    /// collaborator's responsibility.
    ///
    /// # Errors
    /// [`StoreError::NotFound`] if the artifact does not exist
    async fn delete_artifact(&self, id: ArtifactId) -> Result<(), StoreError>;

    /// Links of a project, in store order
    async fn links(&self, project_id: ProjectId) -> Result<Vec<Link>, StoreError>;

    /// Upsert a link by id
    async fn save_link(&self, link: Link) -> Result<(), StoreError>;

    /// Delete a link
    ///
    /// # Errors
    /// [`StoreError::NotFound`] if the link does not exist
    async fn delete_link(&self, id: LinkId) -> Result<(), StoreError>;
}
