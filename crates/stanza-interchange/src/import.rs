//! Flat-record import
//!
//! Each row maps to exactly one quiz-question artifact. Failures are
//! isolated per row: the outcome always carries the full success/failure
//! picture and import never throws on a single bad row.

use std::collections::BTreeSet;

use stanza_artifact::{Answer, AnswerId, Artifact, Feedback, ProjectId, QuestionForm, QuizQuestion};
use stanza_document::Document;

use crate::error::{RowError, RowErrorKind};
use crate::record::{form_label, parse_form_label, TabularRow};

/// Result of importing a batch of rows
#[derive(Debug)]
pub struct ImportOutcome {
    /// One artifact per valid row, in row order
    pub artifacts: Vec<Artifact<QuizQuestion>>,
    /// One entry per rejected row, in row order
    pub errors: Vec<RowError>,
}

impl ImportOutcome {
    /// Whether every row imported
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Import flat records into quiz-question artifacts
///
/// Row numbers in errors are 1-based. Prose cells are lifted through
/// [`Document::from_plain_text`]; blank answer cells are skipped, not
/// converted to empty answers. New artifacts are created under `project_id`
/// with `author` as creator.
#[must_use]
pub fn import_records(rows: &[TabularRow], project_id: ProjectId, author: &str) -> ImportOutcome {
    let mut artifacts = Vec::new();
    let mut errors = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        let row_number = index + 1;
        match import_row(row, project_id, author) {
            Ok(artifact) => artifacts.push(artifact),
            Err(kind) => {
                tracing::debug!(row = row_number, reason = %kind, "skipping invalid row");
                errors.push(RowError {
                    row: row_number,
                    kind,
                });
            }
        }
    }

    ImportOutcome { artifacts, errors }
}

fn import_row(
    row: &TabularRow,
    project_id: ProjectId,
    author: &str,
) -> Result<Artifact<QuizQuestion>, RowErrorKind> {
    let form = parse_form_label(&row.question_type)
        .ok_or_else(|| RowErrorKind::UnknownTypeLabel(row.question_type.clone()))?;

    // Populated answer cells keep their 1-based column index; correct-answer
    // indices refer to columns, not to positions in the skipped list
    let populated: Vec<(usize, &str)> = row
        .answers
        .iter()
        .enumerate()
        .filter_map(|(index, cell)| {
            // Trim decides blankness only; cell text is imported verbatim
            (!cell.trim().is_empty()).then_some((index + 1, cell.as_str()))
        })
        .collect();
    if populated.is_empty() {
        return Err(RowErrorKind::NoAnswers);
    }

    let correct_columns = parse_correct_indices(&row.correct_answer)?;
    for &index in &correct_columns {
        if !populated.iter().any(|&(column, _)| column == index) {
            return Err(RowErrorKind::CorrectIndexOutOfRange { index });
        }
    }

    check_form_counts(form, populated.len(), correct_columns.len())?;

    let answers = populated
        .into_iter()
        .map(|(column, text)| Answer {
            id: AnswerId::new(),
            text: Document::from_plain_text(text),
            is_correct: correct_columns.contains(&column),
        })
        .collect();

    let question = QuizQuestion::new(form, Document::from_plain_text(&row.question), answers)
        .with_feedback(Feedback {
            correct: Document::from_plain_text(&row.correct_feedback),
            incorrect: Document::from_plain_text(&row.incorrect_feedback),
        });

    Artifact::new(project_id, question, author).map_err(|e| RowErrorKind::Invalid(e.to_string()))
}

/// Parse `"2"` / `"1,3"` into a set of 1-based column indices
fn parse_correct_indices(cell: &str) -> Result<BTreeSet<usize>, RowErrorKind> {
    let malformed = || RowErrorKind::MalformedCorrectAnswer(cell.to_string());
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Err(malformed());
    }
    trimmed
        .split(',')
        .map(|part| match part.trim().parse::<usize>() {
            Ok(0) | Err(_) => Err(malformed()),
            Ok(index) => Ok(index),
        })
        .collect()
}

/// Answer/correct count rules per question form
fn check_form_counts(
    form: QuestionForm,
    answers: usize,
    correct: usize,
) -> Result<(), RowErrorKind> {
    let label = form_label(form);
    match form {
        QuestionForm::TrueFalse => {
            if answers != 2 {
                return Err(RowErrorKind::AnswerCountInvalid {
                    label,
                    expected: 2,
                    actual: answers,
                });
            }
            if correct != 1 {
                return Err(RowErrorKind::CorrectCountInvalid {
                    label,
                    actual: correct,
                });
            }
        }
        QuestionForm::SingleCorrect => {
            if correct != 1 {
                return Err(RowErrorKind::CorrectCountInvalid {
                    label,
                    actual: correct,
                });
            }
        }
        QuestionForm::MultiCorrect => {
            if correct == 0 {
                return Err(RowErrorKind::CorrectCountInvalid {
                    label,
                    actual: correct,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn true_false_row() -> TabularRow {
        TabularRow {
            question_type: "True/False".to_string(),
            question: "Sky is blue.".to_string(),
            answers: vec!["True".to_string(), "False".to_string()],
            correct_answer: "1".to_string(),
            correct_feedback: "Yes".to_string(),
            incorrect_feedback: "No".to_string(),
        }
    }

    #[test]
    fn true_false_row_imports() {
        let outcome = import_records(&[true_false_row()], ProjectId::new(), "alice");
        assert!(outcome.is_complete());
        assert_eq!(outcome.artifacts.len(), 1);

        let question = &outcome.artifacts[0].payload;
        assert_eq!(question.question_form, QuestionForm::TrueFalse);
        assert_eq!(question.prompt.to_plain_text(), "Sky is blue.");
        assert_eq!(question.answers.len(), 2);
        assert_eq!(question.answers[0].text.to_plain_text(), "True");
        assert!(question.answers[0].is_correct);
        assert_eq!(question.answers[1].text.to_plain_text(), "False");
        assert!(!question.answers[1].is_correct);
        assert_eq!(question.feedback.correct.to_plain_text(), "Yes");
        assert_eq!(question.feedback.incorrect.to_plain_text(), "No");
    }

    #[test]
    fn imported_artifact_is_owned_and_attributed() {
        let project = ProjectId::new();
        let outcome = import_records(&[true_false_row()], project, "alice");
        let artifact = &outcome.artifacts[0];
        assert_eq!(artifact.project_id, project);
        assert_eq!(artifact.metadata.created_by, "alice");
    }

    #[test]
    fn blank_answer_cells_are_skipped() {
        let row = TabularRow {
            question_type: "Multiple Choice".to_string(),
            question: "Pick one".to_string(),
            answers: vec![
                "a".to_string(),
                String::new(),
                "c".to_string(),
                "  ".to_string(),
            ],
            correct_answer: "3".to_string(),
            correct_feedback: String::new(),
            incorrect_feedback: String::new(),
        };
        let outcome = import_records(&[row], ProjectId::new(), "alice");
        assert!(outcome.is_complete());

        let question = &outcome.artifacts[0].payload;
        assert_eq!(question.answers.len(), 2);
        // Index 3 refers to the third column ("c"), not the third surviving answer
        assert!(!question.answers[0].is_correct);
        assert!(question.answers[1].is_correct);
    }

    #[test]
    fn out_of_range_index_rejects_the_row() {
        let row = TabularRow {
            question_type: "Multiple Choice".to_string(),
            question: "Pick one".to_string(),
            answers: vec!["a".to_string(), "b".to_string(), "c".to_string(), "d".to_string()],
            correct_answer: "5".to_string(),
            correct_feedback: String::new(),
            incorrect_feedback: String::new(),
        };
        let outcome = import_records(&[row], ProjectId::new(), "alice");
        assert!(outcome.artifacts.is_empty());
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].row, 1);
        assert_eq!(
            outcome.errors[0].kind,
            RowErrorKind::CorrectIndexOutOfRange { index: 5 }
        );
    }

    #[test]
    fn index_on_blank_cell_rejects_the_row() {
        let row = TabularRow {
            question_type: "Multiple Choice".to_string(),
            question: "Pick one".to_string(),
            answers: vec!["a".to_string(), String::new(), "c".to_string()],
            correct_answer: "2".to_string(),
            correct_feedback: String::new(),
            incorrect_feedback: String::new(),
        };
        let outcome = import_records(&[row], ProjectId::new(), "alice");
        assert_eq!(
            outcome.errors[0].kind,
            RowErrorKind::CorrectIndexOutOfRange { index: 2 }
        );
    }

    #[test]
    fn unknown_label_rejects_the_row() {
        let mut row = true_false_row();
        row.question_type = "Essay".to_string();
        let outcome = import_records(&[row], ProjectId::new(), "alice");
        assert_eq!(
            outcome.errors[0].kind,
            RowErrorKind::UnknownTypeLabel("Essay".to_string())
        );
    }

    #[test]
    fn malformed_correct_answer_rejects_the_row() {
        for bad in ["", "a", "1,b", "0", "1,,2"] {
            let mut row = true_false_row();
            row.correct_answer = bad.to_string();
            let outcome = import_records(&[row], ProjectId::new(), "alice");
            assert!(
                matches!(
                    outcome.errors[0].kind,
                    RowErrorKind::MalformedCorrectAnswer(_)
                ),
                "expected malformed for {bad:?}"
            );
        }
    }

    #[test]
    fn true_false_with_three_answers_rejects_the_row() {
        let mut row = true_false_row();
        row.answers.push("Maybe".to_string());
        let outcome = import_records(&[row], ProjectId::new(), "alice");
        assert_eq!(
            outcome.errors[0].kind,
            RowErrorKind::AnswerCountInvalid {
                label: "True/False",
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn single_correct_with_two_indices_rejects_the_row() {
        let row = TabularRow {
            question_type: "Multiple Choice".to_string(),
            question: "Pick one".to_string(),
            answers: vec!["a".to_string(), "b".to_string()],
            correct_answer: "1,2".to_string(),
            correct_feedback: String::new(),
            incorrect_feedback: String::new(),
        };
        let outcome = import_records(&[row], ProjectId::new(), "alice");
        assert!(matches!(
            outcome.errors[0].kind,
            RowErrorKind::CorrectCountInvalid { actual: 2, .. }
        ));
    }

    #[test]
    fn multi_correct_accepts_several_indices() {
        let row = TabularRow {
            question_type: "Multiple Response".to_string(),
            question: "Pick some".to_string(),
            answers: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            correct_answer: "1,3".to_string(),
            correct_feedback: String::new(),
            incorrect_feedback: String::new(),
        };
        let outcome = import_records(&[row], ProjectId::new(), "alice");
        assert!(outcome.is_complete());
        let question = &outcome.artifacts[0].payload;
        assert_eq!(question.correct_count(), 2);
    }

    #[test]
    fn all_answer_cells_blank_rejects_the_row() {
        let mut row = true_false_row();
        row.answers = vec![String::new(), String::new()];
        let outcome = import_records(&[row], ProjectId::new(), "alice");
        assert_eq!(outcome.errors[0].kind, RowErrorKind::NoAnswers);
    }

    #[test]
    fn bad_row_does_not_block_the_batch() {
        let mut bad = true_false_row();
        bad.question_type = "Essay".to_string();
        let rows = vec![true_false_row(), bad, true_false_row()];

        let outcome = import_records(&rows, ProjectId::new(), "alice");
        assert_eq!(outcome.artifacts.len(), 2);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].row, 2);
    }

    #[test]
    fn duplicate_correct_indices_collapse() {
        let row = TabularRow {
            question_type: "Multiple Choice".to_string(),
            question: "Pick one".to_string(),
            answers: vec!["a".to_string(), "b".to_string()],
            correct_answer: "2,2".to_string(),
            correct_feedback: String::new(),
            incorrect_feedback: String::new(),
        };
        let outcome = import_records(&[row], ProjectId::new(), "alice");
        assert!(outcome.is_complete());
        assert!(outcome.artifacts[0].payload.answers[1].is_correct);
    }
}
