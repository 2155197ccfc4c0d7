//! In-memory reference implementation
//!
//! [`MemoryStore`] holds all state behind a single `RwLock`, so every
//! contract method is one logical transaction: readers never observe a
//! half-applied write. Collections are `IndexMap`s, so listing order is
//! insertion order.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use indexmap::IndexMap;
use stanza_artifact::{ArtifactId, Link, LinkId, Project, ProjectId, RawArtifact, TypeRegistry};
use tokio::sync::RwLock;

use crate::adapter::{NewProject, ProjectPatch, StorageAdapter};
use crate::error::{EntityKind, StoreError};

#[derive(Debug, Default)]
struct MemoryState {
    projects: IndexMap<ProjectId, Project>,
    artifacts: IndexMap<ArtifactId, RawArtifact>,
    links: IndexMap<LinkId, Link>,
}

/// In-memory storage adapter
///
/// Validates artifact writes against a shared [`TypeRegistry`]; pair with
/// [`crate::MigratingStore`] to get migration-on-read.
#[derive(Debug)]
pub struct MemoryStore {
    registry: Arc<TypeRegistry>,
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    /// Create a store validating against `registry`
    #[must_use]
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self {
            registry,
            state: RwLock::new(MemoryState::default()),
        }
    }

    /// Store over the default registry (both built-in types)
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(Arc::new(TypeRegistry::with_defaults()))
    }

    /// Registry this store validates against
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    /// Load an at-rest artifact as-is, bypassing the write-path gate
    ///
    /// At-rest data may sit at an older schema version because it was
    /// written when that version was current. Restoring such data is not a
    /// write in the contract sense: no validation, no metadata touch. Used
    /// when seeding a store from a persisted snapshot.
    pub async fn load_artifact(&self, artifact: RawArtifact) {
        let mut state = self.state.write().await;
        state.artifacts.insert(artifact.id, artifact);
    }
}

#[async_trait]
impl StorageAdapter for MemoryStore {
    async fn projects(&self) -> Result<Vec<Project>, StoreError> {
        let state = self.state.read().await;
        Ok(state.projects.values().cloned().collect())
    }

    async fn project(&self, id: ProjectId) -> Result<Option<Project>, StoreError> {
        let state = self.state.read().await;
        Ok(state.projects.get(&id).cloned())
    }

    async fn create_project(&self, input: NewProject) -> Result<Project, StoreError> {
        let mut project = Project::new(input.name, input.owner_id);
        project.description = input.description;

        let mut state = self.state.write().await;
        tracing::debug!(project = %project.id, "creating project");
        state.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn update_project(
        &self,
        id: ProjectId,
        patch: ProjectPatch,
    ) -> Result<Project, StoreError> {
        let mut state = self.state.write().await;
        let project = state
            .projects
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Project, id))?;

        if let Some(name) = patch.name {
            project.name = name;
        }
        if let Some(description) = patch.description {
            project.description = Some(description);
        }
        project.updated_at = Utc::now().max(project.updated_at);
        Ok(project.clone())
    }

    async fn delete_project(&self, id: ProjectId) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        state
            .projects
            .shift_remove(&id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Project, id))?;

        let artifacts_before = state.artifacts.len();
        let links_before = state.links.len();
        state.artifacts.retain(|_, a| a.project_id != id);
        state.links.retain(|_, l| l.project_id != id);

        tracing::info!(
            project = %id,
            artifacts = artifacts_before - state.artifacts.len(),
            links = links_before - state.links.len(),
            "deleted project with cascade"
        );
        Ok(())
    }

    async fn artifacts(
        &self,
        project_id: ProjectId,
        type_filter: Option<&str>,
    ) -> Result<Vec<RawArtifact>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .artifacts
            .values()
            .filter(|a| a.project_id == project_id)
            .filter(|a| type_filter.map_or(true, |t| a.is_type(t)))
            .cloned()
            .collect())
    }

    async fn artifact(&self, id: ArtifactId) -> Result<Option<RawArtifact>, StoreError> {
        let state = self.state.read().await;
        Ok(state.artifacts.get(&id).cloned())
    }

    async fn save_artifact(&self, artifact: RawArtifact) -> Result<(), StoreError> {
        self.registry.validate_current(&artifact)?;

        let mut state = self.state.write().await;
        let mut artifact = artifact;
        if let Some(existing) = state.artifacts.get(&artifact.id) {
            // Creation provenance is immutable across upserts
            artifact.metadata.created_by = existing.metadata.created_by.clone();
            artifact.metadata.created_at = existing.metadata.created_at;
            artifact.metadata.modified_at = Utc::now().max(existing.metadata.modified_at);
        } else {
            artifact.metadata.modified_at = Utc::now().max(artifact.metadata.modified_at);
        }

        tracing::debug!(
            artifact = %artifact.id,
            type_id = %artifact.type_id,
            "saving artifact"
        );
        state.artifacts.insert(artifact.id, artifact);
        Ok(())
    }

    async fn delete_artifact(&self, id: ArtifactId) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        state
            .artifacts
            .shift_remove(&id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Artifact, id))?;
        tracing::debug!(artifact = %id, "deleted artifact");
        Ok(())
    }

    async fn links(&self, project_id: ProjectId) -> Result<Vec<Link>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .links
            .values()
            .filter(|l| l.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn save_link(&self, link: Link) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        state.links.insert(link.id, link);
        Ok(())
    }

    async fn delete_link(&self, id: LinkId) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        state
            .links
            .shift_remove(&id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Link, id))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use stanza_artifact::{Artifact, QuizQuestion, Relationship, ValidationError};
    use stanza_test_utils::{bank_artifact, true_false_question};

    async fn store_with_project() -> (MemoryStore, Project) {
        let store = MemoryStore::with_defaults();
        let project = store
            .create_project(NewProject::new("Course", "alice"))
            .await
            .unwrap();
        (store, project)
    }

    #[tokio::test]
    async fn project_read_paths_return_none_or_empty() {
        let store = MemoryStore::with_defaults();
        assert!(store.projects().await.unwrap().is_empty());
        assert!(store.project(ProjectId::new()).await.unwrap().is_none());
        assert!(store
            .artifacts(ProjectId::new(), None)
            .await
            .unwrap()
            .is_empty());
        assert!(store.artifact(ArtifactId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_missing_project_is_not_found() {
        let store = MemoryStore::with_defaults();
        let result = store
            .update_project(ProjectId::new(), ProjectPatch::rename("x"))
            .await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn project_patch_applies_partially() {
        let (store, project) = store_with_project().await;
        let updated = store
            .update_project(project.id, ProjectPatch::rename("Course 2"))
            .await
            .unwrap();
        assert_eq!(updated.name, "Course 2");
        assert_eq!(updated.description, project.description);
        assert!(updated.updated_at >= project.updated_at);
    }

    #[tokio::test]
    async fn save_and_read_artifact() {
        let (store, project) = store_with_project().await;
        let artifact = Artifact::new(project.id, true_false_question(), "alice").unwrap();
        let raw = artifact.into_raw().unwrap();

        store.save_artifact(raw.clone()).await.unwrap();
        let read = store.artifact(raw.id).await.unwrap().unwrap();
        assert_eq!(read.id, raw.id);
        assert_eq!(read.data, raw.data);
    }

    #[tokio::test]
    async fn upsert_preserves_creation_provenance() {
        let (store, project) = store_with_project().await;
        let artifact = Artifact::new(project.id, true_false_question(), "alice").unwrap();
        let raw = artifact.into_raw().unwrap();
        store.save_artifact(raw.clone()).await.unwrap();
        let first = store.artifact(raw.id).await.unwrap().unwrap();

        // Second writer tampers with creation fields; the store keeps them
        let mut rewrite = raw.clone();
        rewrite.metadata.created_by = "mallory".to_string();
        rewrite.metadata.created_at = Utc::now();
        rewrite.metadata.modified_by = "bob".to_string();
        store.save_artifact(rewrite).await.unwrap();

        let read = store.artifact(raw.id).await.unwrap().unwrap();
        assert_eq!(read.metadata.created_by, "alice");
        assert_eq!(read.metadata.created_at, first.metadata.created_at);
        assert_eq!(read.metadata.modified_by, "bob");
        assert!(read.metadata.modified_at >= first.metadata.modified_at);
    }

    #[tokio::test]
    async fn save_rejects_stale_schema_version() {
        let (store, project) = store_with_project().await;
        let artifact = Artifact::new(project.id, true_false_question(), "alice").unwrap();
        let mut raw = artifact.into_raw().unwrap();
        raw.schema_version = "1.0".into();
        // Version gate fires before shape validation
        let result = store.save_artifact(raw).await;
        assert!(matches!(
            result,
            Err(StoreError::Validation(
                ValidationError::StaleSchemaVersion { .. }
            ))
        ));
    }

    #[tokio::test]
    async fn save_rejects_invalid_payload() {
        let (store, project) = store_with_project().await;
        let mut question = true_false_question();
        question.answers.pop();
        // Build the raw shape by hand since Artifact::new validates
        let valid = Artifact::new(project.id, true_false_question(), "alice").unwrap();
        let mut raw = valid.into_raw().unwrap();
        raw.data = serde_json::to_value(&question).unwrap();

        let result = store.save_artifact(raw).await;
        assert!(matches!(result, Err(StoreError::Validation(_))));
    }

    #[tokio::test]
    async fn type_filter_selects_only_matching() {
        let (store, project) = store_with_project().await;
        for _ in 0..5 {
            let q = Artifact::new(project.id, true_false_question(), "alice").unwrap();
            store.save_artifact(q.into_raw().unwrap()).await.unwrap();
        }
        for _ in 0..2 {
            let bank = bank_artifact(project.id, Vec::new());
            store.save_artifact(bank.into_raw().unwrap()).await.unwrap();
        }

        let banks = store
            .artifacts(project.id, Some("question-bank"))
            .await
            .unwrap();
        assert_eq!(banks.len(), 2);
        assert!(banks.iter().all(|a| a.is_type("question-bank")));

        let all = store.artifacts(project.id, None).await.unwrap();
        assert_eq!(all.len(), 7);
    }

    #[tokio::test]
    async fn delete_project_cascades() {
        let (store, project) = store_with_project().await;
        let q = Artifact::new(project.id, true_false_question(), "alice").unwrap();
        let question_id = q.id;
        store.save_artifact(q.into_raw().unwrap()).await.unwrap();

        let bank = bank_artifact(project.id, vec![question_id]);
        let bank_id = bank.id;
        store.save_artifact(bank.into_raw().unwrap()).await.unwrap();
        store
            .save_link(Link::new(
                project.id,
                bank_id,
                question_id,
                Relationship::Contains,
                "alice",
            ))
            .await
            .unwrap();

        store.delete_project(project.id).await.unwrap();

        assert!(store.artifacts(project.id, None).await.unwrap().is_empty());
        assert!(store.artifact(question_id).await.unwrap().is_none());
        assert!(store.artifact(bank_id).await.unwrap().is_none());
        assert!(store.links(project.id).await.unwrap().is_empty());
        assert!(store.project(project.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_artifact_leaves_links() {
        let (store, project) = store_with_project().await;
        let q = Artifact::new(project.id, true_false_question(), "alice").unwrap();
        let question_id = q.id;
        store.save_artifact(q.into_raw().unwrap()).await.unwrap();

        let link = Link::new(
            project.id,
            ArtifactId::new(),
            question_id,
            Relationship::Assesses,
            "alice",
        );
        store.save_link(link.clone()).await.unwrap();

        store.delete_artifact(question_id).await.unwrap();

        // Link cleanup is the caller's responsibility
        let links = store.links(project.id).await.unwrap();
        assert_eq!(links, vec![link]);
    }

    #[tokio::test]
    async fn delete_missing_entities_are_not_found() {
        let store = MemoryStore::with_defaults();
        assert!(matches!(
            store.delete_artifact(ArtifactId::new()).await,
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            store.delete_link(LinkId::new()).await,
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            store.delete_project(ProjectId::new()).await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn quiz_question_type_id_matches_filter_tag() {
        // Guards the string tag used by callers of the type filter
        assert_eq!(
            <QuizQuestion as stanza_artifact::ArtifactPayload>::TYPE_ID,
            "quiz-question"
        );
    }
}
