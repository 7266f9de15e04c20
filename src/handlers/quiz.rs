// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    error::{AppError, ErrorResponse},
    models::{
        attempt::{SubmitAnswerRequest, SubmitAnswerResponse},
        category::Category,
        question::PublicQuestion,
    },
    store::QuizStore,
    utils::chart,
};

/// Query parameters selecting a category.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CategoryParams {
    /// Category name, matched case-insensitively.
    pub category: Option<String>,
}

impl CategoryParams {
    fn category(&self) -> &str {
        self.category.as_deref().unwrap_or_default()
    }
}

/// Lists the questions of a category without their answers.
#[utoipa::path(
    get,
    path = "/api/questions",
    tag = "Quiz",
    params(CategoryParams),
    responses(
        (status = 200, description = "Questions of the category", body = [PublicQuestion]),
        (status = 400, description = "Invalid category", body = ErrorResponse)
    )
)]
pub async fn list_questions(
    State(store): State<Arc<QuizStore>>,
    Query(params): Query<CategoryParams>,
) -> Result<Json<Vec<PublicQuestion>>, AppError> {
    let questions = store.list_questions(params.category())?;
    Ok(Json(questions))
}

/// Checks one answer and records the attempt.
///
/// * Category is matched case-insensitively.
/// * The answer must match exactly (case-sensitive, untrimmed).
#[utoipa::path(
    post,
    path = "/api/submit",
    tag = "Quiz",
    request_body = SubmitAnswerRequest,
    responses(
        (status = 200, description = "Answer recorded", body = SubmitAnswerResponse),
        (status = 400, description = "Invalid category or malformed body", body = ErrorResponse),
        (status = 404, description = "Question not found", body = ErrorResponse)
    )
)]
pub async fn submit_answer(
    State(store): State<Arc<QuizStore>>,
    payload: Result<Json<SubmitAnswerRequest>, JsonRejection>,
) -> Result<Json<SubmitAnswerResponse>, AppError> {
    let Json(req) = payload?;

    if let Err(validation_errors) = req.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let category = req.category.as_deref().unwrap_or_default();
    let check = store.check_and_record(category, &req.question_id, &req.user_answer, req.time_taken)?;

    tracing::debug!(
        "Recorded {} answer for {} in '{}'",
        if check.correct { "correct" } else { "incorrect" },
        req.question_id,
        category
    );

    Ok(Json(SubmitAnswerResponse::from(check)))
}

/// Renders the category's correct/incorrect ratio as a PNG pie chart.
#[utoipa::path(
    get,
    path = "/api/stats",
    tag = "Quiz",
    params(CategoryParams),
    responses(
        (status = 200, description = "Pie chart of correct vs incorrect answers (image/png)"),
        (status = 400, description = "Invalid category or no attempts yet", body = ErrorResponse)
    )
)]
pub async fn get_stats(
    State(store): State<Arc<QuizStore>>,
    Query(params): Query<CategoryParams>,
) -> Result<impl IntoResponse, AppError> {
    let category: Category = params.category().parse()?;
    let stats = store.compute_stats(category.as_str())?;

    let png = tokio::task::spawn_blocking(move || {
        chart::render_pie_chart(category.as_str(), &stats)
    })
    .await??;

    Ok(([(header::CONTENT_TYPE, "image/png")], png))
}
