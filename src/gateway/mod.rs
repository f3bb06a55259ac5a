//! HTTP gateway (Axum): upload a document, get the clarity report back as JSON.

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::{AnalyzeResponse, analyze_handler};
pub use state::AppState;

use crate::gate::RegistryStatus;

pub const CLARITY_STATUS_HEADER: &str = "x-clarity-status";
pub const CLARITY_STATUS_HEALTHY: &str = "healthy";
pub const CLARITY_STATUS_READY: &str = "ready";
pub const CLARITY_STATUS_ANALYZED: &str = "analyzed";

pub fn create_router(state: AppState) -> Router {
    let body_limit = state.body_limit();

    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route(
            "/analyze",
            post(analyze_handler).layer(DefaultBodyLimit::max(body_limit)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub gate: &'static str,
    pub models: RegistryStatus,
    pub max_document_bytes: usize,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        CLARITY_STATUS_HEADER,
        HeaderValue::from_static(CLARITY_STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

/// Models are loaded before the listener binds, so a serving process is always ready.
#[tracing::instrument(skip(state))]
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let components = ComponentStatus {
        http: CLARITY_STATUS_READY,
        gate: CLARITY_STATUS_READY,
        models: state.analyzer.gate().registry().status(),
        max_document_bytes: state.analyzer.max_document_bytes(),
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        CLARITY_STATUS_HEADER,
        HeaderValue::from_static(CLARITY_STATUS_READY),
    );

    (
        StatusCode::OK,
        headers,
        Json(ReadyResponse {
            status: "ok",
            components,
        }),
    )
        .into_response()
}
