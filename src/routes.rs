// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    docs,
    handlers::{home, quiz},
    state::AppState,
};

/// Builds the CORS policy for `/api/*`.
///
/// With no configured origins any origin is allowed.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(origins))
}

/// Assembles the main application router.
///
/// * Mounts the quiz API under `/api`.
/// * Applies global middleware (Trace) and CORS on the API routes.
/// * Injects the shared quiz store.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    let api_routes = Router::new()
        .route("/categories", get(home::list_categories))
        .route("/questions", get(quiz::list_questions))
        .route("/submit", post(quiz::submit_answer))
        .route("/stats", get(quiz::get_stats))
        .layer(cors);

    Router::new()
        .route("/", get(home::root))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::{
        config::Config,
        models::{category::Category, question::Question},
        store::QuizStore,
    };

    fn app() -> Router {
        let store = QuizStore::new();
        store.replace_questions(
            Category::Gk,
            vec![Question {
                id: "gk_0".to_string(),
                question: "How many continents are there?".to_string(),
                options: vec!["5".into(), "6".into(), "7".into(), "8".into()],
                answer: "7".to_string(),
            }],
        );
        create_router(AppState {
            store: Arc::new(store),
            config: Config::default(),
        })
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn root_reports_running() {
        let response = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["message"], "Quiz API is running!");
    }

    #[tokio::test]
    async fn missing_category_param_is_invalid() {
        let response = app()
            .oneshot(Request::get("/api/questions").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Invalid category");
    }

    #[tokio::test]
    async fn submit_rejects_non_json_bodies() {
        let request = Request::post("/api/submit")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn cors_allows_any_origin_by_default() {
        let request = Request::get("/api/categories")
            .header(header::ORIGIN, "http://localhost:5173")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn openapi_document_lists_the_quiz_routes() {
        let response = app()
            .oneshot(Request::get("/api-docs/openapi.json").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let doc = body_json(response).await;
        for path in ["/api/categories", "/api/questions", "/api/submit", "/api/stats"] {
            assert!(doc["paths"].get(path).is_some(), "{path} missing");
        }
    }

    #[test]
    fn invalid_origins_are_skipped() {
        // Builds without panicking even when one entry is not a header value.
        let _ = cors_layer(&["http://ok.example".to_string(), "bad\norigin".to_string()]);
    }
}
