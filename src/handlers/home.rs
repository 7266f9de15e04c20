// src/handlers/home.rs

use std::sync::Arc;

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::store::QuizStore;

/// Liveness message.
#[utoipa::path(
    get,
    path = "/",
    tag = "System",
    responses((status = 200, description = "Service is up"))
)]
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Quiz API is running!" }))
}

/// Lists every configured category, including ones whose bank failed to load.
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Quiz",
    responses((status = 200, description = "Category names", body = [String]))
)]
pub async fn list_categories(State(store): State<Arc<QuizStore>>) -> Json<Vec<&'static str>> {
    Json(store.list_categories())
}
