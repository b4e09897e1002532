//! REST API for the document analysis pipeline
//!
//! Success returns the final report as-is; every failure maps to a single
//! `{"detail": ...}` body with no partial payload.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::error::PipelineError;
use crate::service::DocumentAnalyzer;

/// =============================
/// Request / Response Models
/// =============================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub document_text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub analyzer: Arc<DocumentAnalyzer>,
}

/// =============================
/// Error Mapping
/// =============================

enum ApiError {
    Pipeline(PipelineError),
    /// Body was not a valid analyze request
    Rejected(JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Pipeline(e) => {
                let status = if e.is_client_error() {
                    StatusCode::BAD_REQUEST
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                if status.is_server_error() {
                    error!("Analysis failed: {}", e);
                }
                (status, e.to_string())
            }
            ApiError::Rejected(rejection) => (rejection.status(), rejection.body_text()),
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}

/// =============================
/// Handlers
/// =============================

async fn home() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "AI Engine Backend Running" }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn analyze_document(
    State(state): State<ApiState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload.map_err(ApiError::Rejected)?;
    info!(chars = req.document_text.chars().count(), "Received analyze request");

    let output = state
        .analyzer
        .analyze(&req.document_text)
        .await
        .map_err(ApiError::Pipeline)?;

    Ok((StatusCode::OK, Json(output)).into_response())
}

/// =============================
/// Router
/// =============================

pub fn create_router(analyzer: Arc<DocumentAnalyzer>) -> Router {
    let state = ApiState { analyzer };

    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/analyze", post(analyze_document))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(
    analyzer: Arc<DocumentAnalyzer>,
    port: u16,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let router = create_router(analyzer);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EmbeddingProvider, Settings};
    use crate::llm::scripted::ScriptedBackend;
    use crate::models::FinalOutput;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn router(script: Vec<&str>) -> (Router, Arc<ScriptedBackend>) {
        let settings = Settings {
            embedding_provider: EmbeddingProvider::Hashing,
            ..Settings::default()
        };
        let backend = Arc::new(ScriptedBackend::new(script));
        let analyzer = DocumentAnalyzer::with_backend(&settings, backend.clone()).unwrap();
        (create_router(Arc::new(analyzer)), backend)
    }

    fn analyze_request(document_text: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/analyze")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({ "document_text": document_text }).to_string(),
            ))
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_home_and_health() {
        let (app, _) = router(vec![]);

        let response = app
            .clone()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["message"], "AI Engine Backend Running");

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_json(response).await["status"], "healthy");
    }

    #[tokio::test]
    async fn test_analyze_returns_final_output() {
        let (app, _) = router(vec![
            "Summary text.",
            "- summary note",
            r#"[{"task": "Approve Phase 1"}]"#,
            "- action note",
            r#"{"risks": ["Slip"]}"#,
            "- risk note",
        ]);

        let response = app
            .oneshot(analyze_request("Phase 1 approval by June 1."))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["action_items"][0]["dependencies"], serde_json::json!([]));
        assert_eq!(json["risks_and_open_issues"]["open_questions"], serde_json::json!([]));
        assert_eq!(json["agent_messages"][1]["from"], "ActionAgent");

        let output: FinalOutput = serde_json::from_value(json).unwrap();
        assert_eq!(output.summary, "Summary text.");
    }

    #[tokio::test]
    async fn test_empty_document_is_bad_request() {
        let (app, backend) = router(vec![]);

        let response = app.oneshot(analyze_request("  ")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["detail"], "Document text is empty");
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_body_gets_detail_body() {
        let (app, backend) = router(vec![]);

        let request = Request::builder()
            .method("POST")
            .uri("/analyze")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(!json["detail"].as_str().unwrap().is_empty());

        let request = Request::builder()
            .method("POST")
            .uri("/analyze")
            .body(Body::from("plain text"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(body_json(response).await["detail"].is_string());
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_pipeline_failure_has_no_partial_payload() {
        // the script runs out after the summary stage
        let (app, _) = router(vec!["Summary text.", "- summary note"]);

        let response = app
            .oneshot(analyze_request("Phase 1 approval by June 1."))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert!(json["detail"].as_str().unwrap().contains("Model call failed"));
        assert!(json.get("summary").is_none());
    }
}
