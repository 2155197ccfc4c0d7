//! Row-level import errors
//!
//! A bad row never aborts an import: each failure is collected as a
//! [`RowError`] carrying the 1-based row number and a reason code, and the
//! batch continues.

/// Reason a row was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowErrorKind {
    /// `Type` cell is not one of the known labels
    #[error("unknown question type label: {0:?}")]
    UnknownTypeLabel(String),

    /// `CorrectAnswer` cell does not parse as 1-based indices
    #[error("malformed correct answer list: {0:?}")]
    MalformedCorrectAnswer(String),

    /// A correct index points past the answer columns or at a blank cell
    #[error("correct answer index {index} does not match a populated answer column")]
    CorrectIndexOutOfRange { index: usize },

    /// Every answer cell is blank
    #[error("row has no answers")]
    NoAnswers,

    /// Answer count violates the rules of the question form
    #[error("{label} row must have exactly {expected} answers, has {actual}")]
    AnswerCountInvalid {
        label: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Correct-answer count violates the rules of the question form
    #[error("{label} row has an invalid number of correct answers: {actual}")]
    CorrectCountInvalid { label: &'static str, actual: usize },

    /// Assembled question failed payload validation
    #[error("row failed validation: {0}")]
    Invalid(String),
}

/// One rejected row
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("row {row}: {kind}")]
pub struct RowError {
    /// 1-based row number in the imported batch
    pub row: usize,
    /// Reason code
    pub kind: RowErrorKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_error_names_row_and_reason() {
        let err = RowError {
            row: 3,
            kind: RowErrorKind::NoAnswers,
        };
        assert_eq!(err.to_string(), "row 3: row has no answers");
    }

    #[test]
    fn out_of_range_names_the_index() {
        let kind = RowErrorKind::CorrectIndexOutOfRange { index: 5 };
        assert!(kind.to_string().contains('5'));
    }
}
