//! REST endpoints for message analysis and health checks.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

use crate::analysis::AnalysisService;

/// Shared state for the API routes.
#[derive(Clone)]
pub struct ApiState {
    pub service: Arc<AnalysisService>,
}

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    /// Missing field is treated the same as an empty message.
    #[serde(default)]
    message: String,
}

/// POST /api/analyze
///
/// Validates the message, then delegates to the analysis service. The
/// service never fails, so once validation passes this always returns 200.
async fn analyze(
    State(state): State<ApiState>,
    Json(request): Json<AnalyzeRequest>,
) -> impl IntoResponse {
    let message = request.message.trim();
    if message.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Mensagem é obrigatória"})),
        )
            .into_response();
    }

    let verdict = state.service.analyze(message).await;
    Json(verdict).into_response()
}

/// GET /api/health
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Build the API router with CORS restricted to the origin allowlist.
pub fn api_routes(state: ApiState, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(origin = %origin, error = %e, "Skipping unparseable CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/analyze", post(analyze))
        .route("/api/health", get(health))
        .layer(cors)
        .with_state(state)
}
