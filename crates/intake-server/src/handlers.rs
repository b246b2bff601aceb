//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use intake_core::{IngestRequest, IngestResponse, IntakePipeline};

const UI_PAGE: &str = include_str!("ui.html");

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<IntakePipeline>,
}

/// Service status.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub message: String,
    pub status: String,
    pub version: String,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// Error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Errors surfaced to HTTP clients.
#[derive(Debug)]
pub enum AppError {
    /// The request body was not a valid ingest request.
    InvalidRequest(JsonRejection),
    /// The pipeline task did not complete.
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidRequest(rejection) => (rejection.status(), rejection.body_text()),
            AppError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection)
    }
}

/// POST /ingest - Run the intake pipeline on both documents.
async fn ingest(
    State(state): State<AppState>,
    payload: Result<Json<IngestRequest>, JsonRejection>,
) -> Result<Json<IngestResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        debug!("Rejected ingest body: {}", rejection.body_text());
        AppError::from(rejection)
    })?;

    // Audit sinks do blocking file I/O
    let pipeline = Arc::clone(&state.pipeline);
    let response = tokio::task::spawn_blocking(move || pipeline.process(&request))
        .await
        .map_err(|e| {
            error!("Ingest task failed: {}", e);
            AppError::Internal(format!("Task join error: {}", e))
        })?;

    Ok(Json(response))
}

/// GET / - Service status.
async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        message: "intake API".to_string(),
        status: "running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /health - Liveness check.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}

/// GET /ui - Browser form for trying the API.
async fn ui() -> Html<&'static str> {
    Html(UI_PAGE)
}

/// Create the axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(status))
        .route("/health", get(health))
        .route("/ui", get(ui))
        .route("/ingest", post(ingest))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
