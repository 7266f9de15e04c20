// src/error.rs

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

use crate::utils::chart::ChartError;

/// Failures of the quiz store operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizError {
    /// Category is absent or not one of the configured names.
    InvalidCategory,

    /// No question in the category's current bank has the requested id.
    QuestionNotFound,

    /// Stats were requested before anything was submitted.
    NoAttempts,
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            QuizError::InvalidCategory => "Invalid category",
            QuizError::QuestionNotFound => "Question not found",
            QuizError::NoAttempts => "No attempts yet",
        };
        f.write_str(message)
    }
}

impl std::error::Error for QuizError {}

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request
    BadRequest(String),

    // 404 Not Found
    NotFound(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// JSON body of every failed request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

impl From<QuizError> for AppError {
    fn from(err: QuizError) -> Self {
        match err {
            QuizError::QuestionNotFound => AppError::NotFound(err.to_string()),
            QuizError::InvalidCategory | QuizError::NoAttempts => {
                AppError::BadRequest(err.to_string())
            }
        }
    }
}

/// Malformed or missing JSON bodies are client errors.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<ChartError> for AppError {
    fn from(err: ChartError) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_errors_map_to_client_statuses() {
        let cases = [
            (QuizError::InvalidCategory, StatusCode::BAD_REQUEST),
            (QuizError::QuestionNotFound, StatusCode::NOT_FOUND),
            (QuizError::NoAttempts, StatusCode::BAD_REQUEST),
        ];
        for (err, status) in cases {
            let response = AppError::from(err).into_response();
            assert_eq!(response.status(), status, "{err}");
        }
    }

    #[test]
    fn internal_errors_are_masked() {
        let response = AppError::InternalServerError("font exploded".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
