//! Question bank payload
//!
//! The `question-bank` artifact type. Banks reference questions by artifact
//! id; nothing is embedded.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::envelope::ArtifactPayload;
use crate::error::ValidationError;
use crate::id::ArtifactId;

/// Bank-level delivery settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BankSettings {
    /// Passing grade in percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passing_grade: Option<u32>,
    /// Allowed attempts for the whole bank
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempts_allowed: Option<u32>,
}

/// Question bank payload (`question-bank`, schema `1.0`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionBank {
    /// Bank title
    pub title: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered question references (referential, not embedded)
    pub question_ids: Vec<ArtifactId>,
    /// Bank settings
    #[serde(default)]
    pub settings: BankSettings,
}

impl QuestionBank {
    /// Create an empty bank
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            question_ids: Vec::new(),
            settings: BankSettings::default(),
        }
    }

    /// With a description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// With question references
    #[inline]
    #[must_use]
    pub fn with_questions(mut self, question_ids: Vec<ArtifactId>) -> Self {
        self.question_ids = question_ids;
        self
    }

    /// Append a question reference
    pub fn push_question(&mut self, id: ArtifactId) {
        self.question_ids.push(id);
    }
}

impl ArtifactPayload for QuestionBank {
    const TYPE_ID: &'static str = "question-bank";
    const CURRENT_VERSION: &'static str = "1.0";

    fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::Invariant(
                "question bank title is empty".to_string(),
            ));
        }
        if let Some(grade) = self.settings.passing_grade {
            if grade > 100 {
                return Err(ValidationError::Invariant(format!(
                    "passing grade {grade} exceeds 100 percent"
                )));
            }
        }
        Ok(())
    }

    fn schema() -> Option<schemars::schema::RootSchema> {
        Some(schemars::schema_for!(QuestionBank))
    }
}
