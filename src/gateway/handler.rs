use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{error, info, instrument};

use crate::remediation::RemediationResult;

use super::error::GatewayError;
use super::state::AppState;
use super::{CLARITY_STATUS_ANALYZED, CLARITY_STATUS_HEADER};

#[derive(serde::Serialize)]
pub struct AnalyzeResponse {
    pub request_id: String,
    /// Unix timestamp (seconds) at which the analysis finished.
    pub analyzed_at: i64,
    pub results: Vec<RemediationResult>,
}

/// `POST /analyze`: the request body is the raw document.
#[instrument(skip(state, body), fields(bytes = body.len(), request_id = tracing::field::Empty))]
pub async fn analyze_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, GatewayError> {
    if body.is_empty() {
        return Err(GatewayError::EmptyUpload);
    }

    let request_id = uuid::Uuid::new_v4().to_string();
    tracing::Span::current().record("request_id", tracing::field::display(&request_id));

    let results = state.analyzer.analyze(&body).await.map_err(|e| {
        error!(error = %e, "Analysis aborted");
        GatewayError::from(e)
    })?;

    info!(results = results.len(), "Analysis request served");

    let mut headers = HeaderMap::new();
    headers.insert(
        CLARITY_STATUS_HEADER,
        HeaderValue::from_static(CLARITY_STATUS_ANALYZED),
    );

    Ok((
        StatusCode::OK,
        headers,
        Json(AnalyzeResponse {
            request_id,
            analyzed_at: chrono::Utc::now().timestamp(),
            results,
        }),
    )
        .into_response())
}
