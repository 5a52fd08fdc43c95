use thiserror::Error;

use crate::survey::Category;

/// Malformed scoring input. Raised instead of returning a number that
/// silently misrepresents the survey.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("question '{question}': invalid {field} '{value}' (expected one of: {expected})")]
    InvalidField {
        question: String,
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("invalid {field} '{value}' (expected one of: VisibleHousehold, InvisibleHousehold, VisibleParental, InvisibleParental)")]
    InvalidCategory { field: String, value: String },

    #[error("question '{question}': baseWeight must be a positive number, got {value}")]
    InvalidBaseWeight { question: String, value: f64 },

    #[error("question '{question}': effective weight {value} is not a positive finite number")]
    InvalidWeight { question: String, value: f64 },

    #[error("multipliers.{table}.{level}: must be a positive finite number, got {value}")]
    InvalidMultiplier {
        table: &'static str,
        level: &'static str,
        value: f64,
    },

    #[error("priorities: category {category} is assigned more than once")]
    DuplicatePriority { category: Category },

    #[error("catalog: question id '{id}' appears more than once")]
    DuplicateQuestionId { id: String },

    #[error("response for '{question}': unknown responder '{value}'")]
    InvalidResponder { question: String, value: String },
}
