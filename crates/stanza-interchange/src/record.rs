//! Flat interchange record
//!
//! The external authoring tool imports and exports quiz questions as flat
//! spreadsheet rows with the fixed column order
//! `Type, Question, Answer1..AnswerN, CorrectAnswer, CorrectFeedback,
//! IncorrectFeedback`. [`TabularRow`] is that record with the answer cells
//! gathered into one ordered list; [`TabularRow::into_cells`] and
//! [`TabularRow::from_cells`] map to and from the raw column layout.

use serde::{Deserialize, Serialize};
use stanza_artifact::QuestionForm;

/// Answer columns in the standard sheet layout
pub const SHEET_ANSWER_COLUMNS: usize = 4;

/// One flat interchange record
///
/// `answers` holds the `Answer1..AnswerN` cells in column order; blank cells
/// may appear in place and are skipped (not treated as empty answers) on
/// import. `correct_answer` is a comma-separated list of 1-based answer
/// column indices (e.g. `"2"` or `"1,3"`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabularRow {
    /// External question-type label (`Type` column)
    pub question_type: String,
    /// Question prose (`Question` column)
    pub question: String,
    /// `Answer1..AnswerN` cells in column order
    pub answers: Vec<String>,
    /// Comma-separated 1-based correct column indices
    pub correct_answer: String,
    /// Feedback for a correct response
    pub correct_feedback: String,
    /// Feedback for an incorrect response
    pub incorrect_feedback: String,
}

impl TabularRow {
    /// Header row for a sheet with `answer_columns` answer columns
    #[must_use]
    pub fn headers(answer_columns: usize) -> Vec<String> {
        let mut headers = Vec::with_capacity(answer_columns + 5);
        headers.push("Type".to_string());
        headers.push("Question".to_string());
        for i in 1..=answer_columns {
            headers.push(format!("Answer{i}"));
        }
        headers.push("CorrectAnswer".to_string());
        headers.push("CorrectFeedback".to_string());
        headers.push("IncorrectFeedback".to_string());
        headers
    }

    /// Flatten into the raw column layout
    ///
    /// Pads the answer cells with blanks up to `answer_columns` (questions
    /// with more answers widen the row instead of losing cells).
    #[must_use]
    pub fn into_cells(self, answer_columns: usize) -> Vec<String> {
        let width = self.answers.len().max(answer_columns);
        let mut cells = Vec::with_capacity(width + 5);
        cells.push(self.question_type);
        cells.push(self.question);
        let mut answers = self.answers;
        answers.resize(width, String::new());
        cells.extend(answers);
        cells.push(self.correct_answer);
        cells.push(self.correct_feedback);
        cells.push(self.incorrect_feedback);
        cells
    }

    /// Rebuild from the raw column layout
    ///
    /// Returns `None` when the slice is too short to hold the fixed columns
    /// (type, question, the three trailing columns).
    #[must_use]
    pub fn from_cells(cells: &[String]) -> Option<Self> {
        if cells.len() < 5 {
            return None;
        }
        let tail = cells.len() - 3;
        Some(Self {
            question_type: cells[0].clone(),
            question: cells[1].clone(),
            answers: cells[2..tail].to_vec(),
            correct_answer: cells[tail].clone(),
            correct_feedback: cells[tail + 1].clone(),
            incorrect_feedback: cells[tail + 2].clone(),
        })
    }
}

/// External label for a question form (`Type` column value)
#[must_use]
pub fn form_label(form: QuestionForm) -> &'static str {
    match form {
        QuestionForm::SingleCorrect => "Multiple Choice",
        QuestionForm::MultiCorrect => "Multiple Response",
        QuestionForm::TrueFalse => "True/False",
    }
}

/// Parse an external question-type label
///
/// The table is fixed and 1:1; unknown labels return `None`.
#[must_use]
pub fn parse_form_label(label: &str) -> Option<QuestionForm> {
    match label.trim() {
        "Multiple Choice" => Some(QuestionForm::SingleCorrect),
        "Multiple Response" => Some(QuestionForm::MultiCorrect),
        "True/False" => Some(QuestionForm::TrueFalse),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_row() -> TabularRow {
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
    fn labels_round_trip() {
        for form in [
            QuestionForm::SingleCorrect,
            QuestionForm::MultiCorrect,
            QuestionForm::TrueFalse,
        ] {
            assert_eq!(parse_form_label(form_label(form)), Some(form));
        }
    }

    #[test]
    fn unknown_label_is_none() {
        assert_eq!(parse_form_label("Essay"), None);
        assert_eq!(parse_form_label(""), None);
    }

    #[test]
    fn headers_follow_column_order() {
        let headers = TabularRow::headers(4);
        assert_eq!(
            headers,
            vec![
                "Type",
                "Question",
                "Answer1",
                "Answer2",
                "Answer3",
                "Answer4",
                "CorrectAnswer",
                "CorrectFeedback",
                "IncorrectFeedback"
            ]
        );
    }

    #[test]
    fn cells_round_trip_pads_blanks() {
        let cells = sample_row().into_cells(SHEET_ANSWER_COLUMNS);
        assert_eq!(cells.len(), 9);
        assert_eq!(cells[2], "True");
        assert_eq!(cells[4], "");

        let back = TabularRow::from_cells(&cells).unwrap();
        assert_eq!(back.question, "Sky is blue.");
        assert_eq!(back.answers.len(), 4);
        assert_eq!(back.correct_answer, "1");
    }

    #[test]
    fn into_cells_widens_for_extra_answers() {
        let mut row = sample_row();
        row.answers = (1..=6).map(|i| format!("a{i}")).collect();
        let cells = row.into_cells(SHEET_ANSWER_COLUMNS);
        assert_eq!(cells.len(), 11);
    }

    #[test]
    fn from_cells_rejects_short_rows() {
        let cells: Vec<String> = vec!["Type".into(), "Q".into()];
        assert!(TabularRow::from_cells(&cells).is_none());
    }
}
