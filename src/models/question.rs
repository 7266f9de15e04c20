// src/models/question.rs

use serde::Serialize;
use utoipa::ToSchema;

/// A loaded multiple-choice question.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    /// `<category>_<n>`, assigned after the bank's rows are shuffled.
    pub id: String,

    /// The text of the question.
    pub question: String,

    /// The correct answer and three distractors, shuffled.
    pub options: Vec<String>,

    /// Equal to exactly one element of `options`.
    pub answer: String,
}

/// DTO for sending a question to the client (excludes the answer).
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PublicQuestion {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
}

impl From<&Question> for PublicQuestion {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id.clone(),
            question: question.question.clone(),
            options: question.options.clone(),
        }
    }
}
