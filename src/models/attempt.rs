// src/models/attempt.rs

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// One recorded submission.
/// Holds a copy of the question text, not the question id, so it survives reloads.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    pub question_text: String,
    pub is_correct: bool,
    /// Seconds reported by the client; 0 when omitted.
    pub time_taken: f64,
}

/// Result of checking one answer against the bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerCheck {
    pub correct: bool,
    pub correct_answer: String,
}

/// Correct/incorrect tally for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub correct: usize,
    pub incorrect: usize,
}

impl Stats {
    pub fn from_attempts(attempts: &[Attempt]) -> Self {
        let total = attempts.len();
        let correct = attempts.iter().filter(|a| a.is_correct).count();
        Self {
            total,
            correct,
            incorrect: total - correct,
        }
    }
}

/// DTO for submitting one answer.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitAnswerRequest {
    #[serde(default)]
    pub category: Option<String>,

    /// Accepted as a JSON string or number.
    #[serde(deserialize_with = "text_from_string_or_number")]
    #[schema(value_type = String)]
    pub question_id: String,

    /// Accepted as a JSON string or number; `1` matches the option `"1"`.
    #[serde(deserialize_with = "text_from_string_or_number")]
    #[schema(value_type = String)]
    pub user_answer: String,

    /// Seconds spent on the question.
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub time_taken: Option<f64>,
}

/// DTO returned after an answer is recorded.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitAnswerResponse {
    pub correct: bool,
    pub correct_answer: String,
    pub message: String,
}

impl From<AnswerCheck> for SubmitAnswerResponse {
    fn from(check: AnswerCheck) -> Self {
        let message = if check.correct {
            "Correct!".to_string()
        } else {
            format!("Incorrect. Correct: {}", check.correct_answer)
        };
        Self {
            correct: check.correct,
            correct_answer: check.correct_answer,
            message,
        }
    }
}

fn text_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawText {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawText::deserialize(deserializer)? {
        RawText::Text(text) => text,
        RawText::Number(number) => number.to_string(),
    })
}
