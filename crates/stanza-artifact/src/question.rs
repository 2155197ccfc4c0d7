//! Quiz question payload
//!
//! The `quiz-question` artifact type. Current schema version is `2.0`;
//! version `1.0` predates per-question feedback and settings and is kept in
//! [`legacy`] so the registry can validate at-rest data and the migration
//! engine can upgrade it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use stanza_document::Document;

use crate::envelope::ArtifactPayload;
use crate::error::{MigrationError, ValidationError};
use crate::id::AnswerId;

/// Closed set of question forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuestionForm {
    /// Exactly one correct answer
    SingleCorrect,
    /// One or more correct answers
    MultiCorrect,
    /// Exactly two answers, one correct
    TrueFalse,
}

/// One answer option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    /// Unique within the question
    pub id: AnswerId,
    /// Answer prose
    pub text: Document,
    /// Whether this option is correct
    pub is_correct: bool,
}

impl Answer {
    /// Incorrect answer option
    #[must_use]
    pub fn new(text: Document) -> Self {
        Self {
            id: AnswerId::new(),
            text,
            is_correct: false,
        }
    }

    /// Correct answer option
    #[must_use]
    pub fn correct(text: Document) -> Self {
        Self {
            id: AnswerId::new(),
            text,
            is_correct: true,
        }
    }
}

/// Feedback shown after answering
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    /// Shown for a correct response
    pub correct: Document,
    /// Shown for an incorrect response
    pub incorrect: Document,
}

/// Per-question delivery settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizSettings {
    /// Points awarded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    /// Allowed attempts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempts: Option<u32>,
    /// Shuffle answer order at delivery
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub randomize: Option<bool>,
}

/// Quiz question payload (`quiz-question`, schema `2.0`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    /// Question form
    pub question_form: QuestionForm,
    /// Question prose
    pub prompt: Document,
    /// Ordered answer options
    pub answers: Vec<Answer>,
    /// Response feedback
    #[serde(default)]
    pub feedback: Feedback,
    /// Delivery settings
    #[serde(default)]
    pub settings: QuizSettings,
}

impl QuizQuestion {
    /// Create a question with default feedback and settings
    #[must_use]
    pub fn new(question_form: QuestionForm, prompt: Document, answers: Vec<Answer>) -> Self {
        Self {
            question_form,
            prompt,
            answers,
            feedback: Feedback::default(),
            settings: QuizSettings::default(),
        }
    }

    /// Replace the feedback
    #[inline]
    #[must_use]
    pub fn with_feedback(mut self, feedback: Feedback) -> Self {
        self.feedback = feedback;
        self
    }

    /// Replace the settings
    #[inline]
    #[must_use]
    pub fn with_settings(mut self, settings: QuizSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Number of answers flagged correct
    #[inline]
    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_correct).count()
    }
}

/// Answer-count and correct-count rules shared by both schema versions
fn check_form_invariants(
    form: QuestionForm,
    answers: &[Answer],
) -> Result<(), ValidationError> {
    if answers.is_empty() {
        return Err(ValidationError::Invariant(
            "question has no answers".to_string(),
        ));
    }
    let correct = answers.iter().filter(|a| a.is_correct).count();
    match form {
        QuestionForm::TrueFalse => {
            if answers.len() != 2 {
                return Err(ValidationError::Invariant(format!(
                    "true/false question must have exactly 2 answers, has {}",
                    answers.len()
                )));
            }
            if correct != 1 {
                return Err(ValidationError::Invariant(format!(
                    "true/false question must have exactly 1 correct answer, has {correct}"
                )));
            }
        }
        QuestionForm::SingleCorrect => {
            if correct != 1 {
                return Err(ValidationError::Invariant(format!(
                    "single-correct question must have exactly 1 correct answer, has {correct}"
                )));
            }
        }
        QuestionForm::MultiCorrect => {
            if correct == 0 {
                return Err(ValidationError::Invariant(
                    "multi-correct question must have at least 1 correct answer".to_string(),
                ));
            }
        }
    }
    Ok(())
}

impl ArtifactPayload for QuizQuestion {
    const TYPE_ID: &'static str = "quiz-question";
    const CURRENT_VERSION: &'static str = "2.0";

    fn validate(&self) -> Result<(), ValidationError> {
        self.prompt.validate()?;
        for answer in &self.answers {
            answer.text.validate()?;
        }
        self.feedback.correct.validate()?;
        self.feedback.incorrect.validate()?;
        check_form_invariants(self.question_form, &self.answers)
    }

    fn schema() -> Option<schemars::schema::RootSchema> {
        Some(schemars::schema_for!(QuizQuestion))
    }
}

/// Legacy schema versions of `quiz-question`
pub mod legacy {
    use super::{
        check_form_invariants, Answer, ArtifactPayload, Deserialize, Feedback, JsonValue,
        MigrationError, QuestionForm, QuizQuestion, QuizSettings, Serialize, ValidationError,
    };
    use stanza_document::Document;

    /// Schema version this module describes
    pub const VERSION: &str = "1.0";

    /// `quiz-question` payload at schema `1.0`
    ///
    /// Predates per-question feedback and delivery settings.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QuizQuestionV1 {
        pub question_form: QuestionForm,
        pub prompt: Document,
        pub answers: Vec<Answer>,
    }

    impl QuizQuestionV1 {
        /// Invariants at schema `1.0` (same form rules, no feedback)
        ///
        /// # Errors
        /// Returns the violated invariant
        pub fn validate(&self) -> Result<(), ValidationError> {
            self.prompt.validate()?;
            for answer in &self.answers {
                answer.text.validate()?;
            }
            check_form_invariants(self.question_form, &self.answers)
        }

        /// Upgrade to the current shape with empty feedback and defaults
        #[must_use]
        pub fn upgrade(self) -> QuizQuestion {
            QuizQuestion {
                question_form: self.question_form,
                prompt: self.prompt,
                answers: self.answers,
                feedback: Feedback::default(),
                settings: QuizSettings::default(),
            }
        }
    }

    /// Registered migration: `quiz-question` `1.0` -> `2.0`
    ///
    /// Pure function over the opaque payload value.
    ///
    /// # Errors
    /// Returns [`MigrationError::StepFailed`] if the value is not a valid
    /// `1.0` payload
    pub fn migrate_v1_to_v2(value: JsonValue) -> Result<JsonValue, MigrationError> {
        let v1: QuizQuestionV1 =
            serde_json::from_value(value).map_err(|e| MigrationError::StepFailed {
                type_id: QuizQuestion::TYPE_ID.to_string(),
                from: VERSION.into(),
                reason: e.to_string(),
            })?;
        serde_json::to_value(v1.upgrade()).map_err(|e| MigrationError::StepFailed {
            type_id: QuizQuestion::TYPE_ID.to_string(),
            from: VERSION.into(),
            reason: e.to_string(),
        })
    }
}
