//! Migration-on-read decorator
//!
//! [`MigratingStore`] wraps any [`StorageAdapter`] and runs the migration
//! engine over every artifact read path before results reach a caller, so
//! callers only ever see current-schema payloads. Write and delete paths
//! delegate unchanged: the inner adapter's write gate already rejects
//! non-current versions, which keeps at-rest data explicit about its actual
//! version.

use std::sync::Arc;

use async_trait::async_trait;
use stanza_artifact::{
    ArtifactId, Link, LinkId, MigrationEngine, Project, ProjectId, RawArtifact,
};

use crate::adapter::{NewProject, ProjectPatch, StorageAdapter};
use crate::error::StoreError;

/// Adapter decorator applying migrations on every artifact read
#[derive(Debug)]
pub struct MigratingStore<S> {
    inner: S,
    engine: Arc<MigrationEngine>,
}

impl<S: StorageAdapter> MigratingStore<S> {
    /// Wrap an adapter with a migration engine
    #[must_use]
    pub fn new(inner: S, engine: Arc<MigrationEngine>) -> Self {
        Self { inner, engine }
    }

    /// The wrapped adapter
    #[inline]
    #[must_use]
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Unwrap the decorator
    #[must_use]
    pub fn into_inner(self) -> S {
        self.inner
    }

    fn resolve(&self, artifact: RawArtifact) -> Result<RawArtifact, StoreError> {
        self.engine
            .resolve_to_current(artifact)
            .map_err(StoreError::from)
    }
}

#[async_trait]
impl<S: StorageAdapter> StorageAdapter for MigratingStore<S> {
    async fn projects(&self) -> Result<Vec<Project>, StoreError> {
        self.inner.projects().await
    }

    async fn project(&self, id: ProjectId) -> Result<Option<Project>, StoreError> {
        self.inner.project(id).await
    }

    async fn create_project(&self, input: NewProject) -> Result<Project, StoreError> {
        self.inner.create_project(input).await
    }

    async fn update_project(
        &self,
        id: ProjectId,
        patch: ProjectPatch,
    ) -> Result<Project, StoreError> {
        self.inner.update_project(id, patch).await
    }

    async fn delete_project(&self, id: ProjectId) -> Result<(), StoreError> {
        self.inner.delete_project(id).await
    }

    async fn artifacts(
        &self,
        project_id: ProjectId,
        type_filter: Option<&str>,
    ) -> Result<Vec<RawArtifact>, StoreError> {
        let artifacts = self.inner.artifacts(project_id, type_filter).await?;
        artifacts
            .into_iter()
            .map(|artifact| self.resolve(artifact))
            .collect()
    }

    async fn artifact(&self, id: ArtifactId) -> Result<Option<RawArtifact>, StoreError> {
        match self.inner.artifact(id).await? {
            Some(artifact) => Ok(Some(self.resolve(artifact)?)),
            None => Ok(None),
        }
    }

    async fn save_artifact(&self, artifact: RawArtifact) -> Result<(), StoreError> {
        self.inner.save_artifact(artifact).await
    }

    async fn delete_artifact(&self, id: ArtifactId) -> Result<(), StoreError> {
        self.inner.delete_artifact(id).await
    }

    async fn links(&self, project_id: ProjectId) -> Result<Vec<Link>, StoreError> {
        self.inner.links(project_id).await
    }

    async fn save_link(&self, link: Link) -> Result<(), StoreError> {
        self.inner.save_link(link).await
    }

    async fn delete_link(&self, id: LinkId) -> Result<(), StoreError> {
        self.inner.delete_link(id).await
    }
}
