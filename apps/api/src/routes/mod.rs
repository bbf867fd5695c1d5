pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::optimizer::handlers;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound("No such route".to_string())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route("/api/v1/optimize", post(handlers::handle_optimize))
        .route("/api/v1/suggestions", post(handlers::handle_suggestions))
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::optimizer::Optimizer;

    fn test_state() -> AppState {
        let config = Config {
            anthropic_api_key: None,
            port: 0,
            rust_log: "info".into(),
            rewrite_timeout_secs: 5,
            metric_seed: Some(1),
            enable_external_rewrite: false,
        };
        AppState::new(Optimizer::default().with_metric_seed(Some(1)), config)
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request");
        let response = build_router(test_state()).oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health_reports_counters() {
        let request = Request::builder().uri("/health").body(Body::empty()).expect("request");
        let response = build_router(test_state()).oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let body: Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(body["status"], "ok");
        assert_eq!(body["external_rewrite"], false);
        assert_eq!(body["reconciliation"]["accepted"], 0);
    }

    #[tokio::test]
    async fn test_analyze_endpoint() {
        let (status, body) = post_json(
            "/api/v1/analyze",
            json!({ "resume_text": "WORK EXPERIENCE\n• Responsible for the company website" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_already_optimized"], false);
        assert!(body["score"]["composite_score"].as_u64().is_some());
    }

    #[tokio::test]
    async fn test_empty_resume_is_bad_request() {
        let (status, body) = post_json("/api/v1/analyze", json!({ "resume_text": "  " })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_optimize_endpoint_ignores_external_when_disabled() {
        let (status, body) = post_json(
            "/api/v1/optimize",
            json!({
                "resume_text": "PROJECTS\n• Was responsible for developing and maintaining the company website",
                "use_external_rewrite": true
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["used_external_rewrite"], false);
        assert!(body["fallback_reason"].is_null());
        let optimized = body["optimized"].as_str().unwrap_or_default();
        assert!(optimized.contains("Managed developing"), "optimized: {optimized}");
    }

    #[tokio::test]
    async fn test_suggestions_endpoint() {
        let (status, body) = post_json(
            "/api/v1/suggestions",
            json!({ "resume_text": "• Worked on the payments API", "job_description": "Kafka streaming engineer" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let kinds: Vec<&str> = body["suggestions"]
            .as_array()
            .map(|a| a.iter().filter_map(|s| s["kind"].as_str()).collect())
            .unwrap_or_default();
        assert!(kinds.contains(&"weak_phrase"));
        assert!(kinds.contains(&"job_match"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (status, body) = post_json("/api/v1/nope", json!({})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
