// src/docs.rs

use axum::Json;
use utoipa::OpenApi;

use crate::{
    error::ErrorResponse,
    handlers::{home, quiz},
    models::{
        attempt::{SubmitAnswerRequest, SubmitAnswerResponse},
        question::PublicQuestion,
    },
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Quiz API", description = "Randomized quiz questions with per-category stats"),
    paths(
        home::root,
        home::list_categories,
        quiz::list_questions,
        quiz::submit_answer,
        quiz::get_stats,
    ),
    components(schemas(PublicQuestion, SubmitAnswerRequest, SubmitAnswerResponse, ErrorResponse)),
    tags(
        (name = "System", description = "Service health"),
        (name = "Quiz", description = "Questions, answers and stats")
    )
)]
pub struct ApiDoc;

/// Serves the OpenAPI document as JSON.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
