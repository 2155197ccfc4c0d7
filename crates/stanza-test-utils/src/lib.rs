//! Testing utilities for the Stanza workspace
//!
//! Shared fixtures: ready-made questions per form, banks, projects, and
//! legacy at-rest payloads for migration tests.

#![allow(missing_docs)]

use serde_json::json;
use stanza_artifact::{
    Answer, AnswerId, Artifact, ArtifactId, ArtifactMetadata, ProjectId, QuestionBank,
    QuestionForm, QuizQuestion, RawArtifact,
};
use stanza_document::Document;

/// Initialize tracing for a test binary; safe to call repeatedly
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

pub fn true_false_question() -> QuizQuestion {
    QuizQuestion::new(
        QuestionForm::TrueFalse,
        Document::from_plain_text("Sky is blue."),
        vec![
            Answer::correct(Document::from_plain_text("True")),
            Answer::new(Document::from_plain_text("False")),
        ],
    )
}

pub fn single_correct_question() -> QuizQuestion {
    QuizQuestion::new(
        QuestionForm::SingleCorrect,
        Document::from_plain_text("Capital of France?"),
        vec![
            Answer::correct(Document::from_plain_text("Paris")),
            Answer::new(Document::from_plain_text("Lyon")),
            Answer::new(Document::from_plain_text("Marseille")),
        ],
    )
}

pub fn multi_correct_question() -> QuizQuestion {
    QuizQuestion::new(
        QuestionForm::MultiCorrect,
        Document::from_plain_text("Which are prime?"),
        vec![
            Answer::correct(Document::from_plain_text("2")),
            Answer::new(Document::from_plain_text("4")),
            Answer::correct(Document::from_plain_text("5")),
        ],
    )
}

/// Question artifact under `project`, created by alice
pub fn question_artifact(project: ProjectId, question: QuizQuestion) -> Artifact<QuizQuestion> {
    Artifact::new(project, question, "alice").expect("fixture question is valid")
}

/// Bank artifact referencing `question_ids`, created by alice
pub fn bank_artifact(project: ProjectId, question_ids: Vec<ArtifactId>) -> Artifact<QuestionBank> {
    let bank = QuestionBank::new("Fixture bank").with_questions(question_ids);
    Artifact::new(project, bank, "alice").expect("fixture bank is valid")
}

/// At-rest `quiz-question` artifact at legacy schema `1.0`
///
/// Shaped the way the store held it before feedback/settings existed;
/// bypasses the typed envelope on purpose.
pub fn legacy_question_raw(project: ProjectId) -> RawArtifact {
    RawArtifact {
        id: ArtifactId::new(),
        project_id: project,
        type_id: "quiz-question".to_string(),
        schema_version: "1.0".into(),
        metadata: ArtifactMetadata::new("alice"),
        data: json!({
            "questionForm": "true_false",
            "prompt": {"content": [
                {"kind": "paragraph", "content": [{"kind": "text", "text": "Water boils at 100C."}]}
            ]},
            "answers": [
                {
                    "id": AnswerId::new(),
                    "text": {"content": [{"kind": "paragraph", "content": [{"kind": "text", "text": "True"}]}]},
                    "isCorrect": true
                },
                {
                    "id": AnswerId::new(),
                    "text": {"content": [{"kind": "paragraph", "content": [{"kind": "text", "text": "False"}]}]},
                    "isCorrect": false
                }
            ]
        }),
    }
}
