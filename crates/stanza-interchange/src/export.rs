//! Flat-record export
//!
//! Inverse direction of [`crate::import_records`]: prose fields are
//! projected through `Document::to_plain_text` (the documented lossy
//! policy — formatting and block structure do not survive), and correct
//! flags are re-encoded as a comma-separated list of 1-based indices.
//!
//! An answer whose plain-text projection is blank exports as a blank cell
//! and will be skipped on re-import; the round-trip guarantee covers
//! questions whose answers carry visible text.

use stanza_artifact::{Artifact, QuizQuestion};

use crate::record::{form_label, TabularRow};

/// Export quiz-question artifacts as flat records
///
/// Pure function with no storage side effects; rows come out in artifact
/// order.
#[must_use]
pub fn export_records(artifacts: &[Artifact<QuizQuestion>]) -> Vec<TabularRow> {
    artifacts.iter().map(export_row).collect()
}

fn export_row(artifact: &Artifact<QuizQuestion>) -> TabularRow {
    let question = &artifact.payload;
    let correct_answer = question
        .answers
        .iter()
        .enumerate()
        .filter(|(_, answer)| answer.is_correct)
        .map(|(index, _)| (index + 1).to_string())
        .collect::<Vec<_>>()
        .join(",");

    TabularRow {
        question_type: form_label(question.question_form).to_string(),
        question: question.prompt.to_plain_text(),
        answers: question
            .answers
            .iter()
            .map(|answer| answer.text.to_plain_text())
            .collect(),
        correct_answer,
        correct_feedback: question.feedback.correct.to_plain_text(),
        incorrect_feedback: question.feedback.incorrect.to_plain_text(),
    }
}
