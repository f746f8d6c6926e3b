// Photo Classifier - Web Server
// REST API with Axum: POST a batch, get the renamed photos back

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use photo_classifier::logging::init_logging;
use photo_classifier::{build_plan, classify, ClassifyError, RenamePlan};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

const ADDR_ENV: &str = "PHOTO_CLASSIFIER_ADDR";
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

impl ApiResponse<Option<()>> {
    fn failed(error: &ClassifyError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
        }
    }
}

fn rejected(error: ClassifyError) -> Response {
    warn!(line = ?error.line(), "rejected batch: {}", error);
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiResponse::failed(&error)),
    )
        .into_response()
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// POST /api/classify - Plain-text batch in, renamed lines out
async fn classify_batch(body: String) -> Response {
    match classify(&body) {
        Ok(output) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            output,
        )
            .into_response(),
        Err(e) => rejected(e),
    }
}

/// POST /api/plan - Plain-text batch in, rename plan as JSON out
async fn plan_batch(body: String) -> Response {
    match build_plan(&body) {
        Ok(plan) => (StatusCode::OK, Json(ApiResponse::<RenamePlan>::ok(plan))).into_response(),
        Err(e) => rejected(e),
    }
}

fn router() -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/classify", post(classify_batch))
        .route("/plan", post(plan_batch));

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let addr = std::env::var(ADDR_ENV).unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", addr, e))?;

    info!(%addr, version = photo_classifier::VERSION, "photo-classifier server listening");

    axum::serve(listener, router())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    const GOOD_BATCH: &str = "a.jpg,X,2020-01-01 00:00:01\nb.jpg,X,2020-01-01 00:00:00\n";

    async fn post(uri: &str, body: &str) -> (StatusCode, Option<String>, String) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = router().oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health_check() {
        let request = Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();
        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"], "OK");
    }

    #[tokio::test]
    async fn test_classify_returns_plain_text() {
        let (status, content_type, body) = post("/api/classify", GOOD_BATCH).await;

        assert_eq!(status, StatusCode::OK);
        assert!(content_type.unwrap().starts_with("text/plain"));
        assert_eq!(body, "X2.jpg\nX1.jpg\n");
    }

    #[tokio::test]
    async fn test_classify_bad_batch_is_unprocessable() {
        let (status, _, body) = post("/api/classify", "noext,X,2020-01-01 00:00:00\n").await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["success"], false);
        assert!(value["data"].is_null());
        assert!(body.contains("\"data\":null"));
        assert!(value["error"]
            .as_str()
            .unwrap()
            .contains("filename has no extension"));
    }

    #[tokio::test]
    async fn test_plan_returns_json() {
        let (status, content_type, body) = post("/api/plan", GOOD_BATCH).await;

        assert_eq!(status, StatusCode::OK);
        assert!(content_type.unwrap().starts_with("application/json"));
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["renames"][0]["original"], "a.jpg");
        assert_eq!(value["data"]["renames"][0]["renamed"], "X2.jpg");
        assert!(value.get("error").is_none());
    }

    #[tokio::test]
    async fn test_plan_bad_timestamp_is_unprocessable() {
        let (status, _, body) = post("/api/plan", "a.jpg,X,yesterday\n").await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.contains("\"data\":null"));
    }
}
