//! Project model
//!
//! A project owns artifacts and links by `project_id`. Team membership and
//! permissions live outside the core.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::id::ProjectId;

/// Project record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique identifier
    pub id: ProjectId,
    /// Display name
    pub name: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning user
    pub owner_id: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Create a project owned by `owner_id`
    #[must_use]
    pub fn new(name: impl Into<String>, owner_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ProjectId::new(),
            name: name.into(),
            description: None,
            owner_id: owner_id.into(),
            created_at: now,
            updated_at: now,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_project_timestamps_match() {
        let project = Project::new("Course A", "alice");
        assert_eq!(project.created_at, project.updated_at);
        assert_eq!(project.owner_id, "alice");
    }

    #[test]
    fn serde_shape_is_camel_case() {
        let json = serde_json::to_value(Project::new("Course A", "alice")).unwrap();
        assert!(json.get("ownerId").is_some());
        assert!(json.get("createdAt").is_some());
    }
}
