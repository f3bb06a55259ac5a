use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::remediation::AnalysisError;

use super::CLARITY_STATUS_HEADER;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Uploaded file is empty.")]
    EmptyUpload,

    #[error("analysis failed: {0}")]
    AnalysisFailed(#[from] AnalysisError),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, clarity_status) = match &self {
            GatewayError::EmptyUpload => (StatusCode::BAD_REQUEST, "invalid_request"),
            GatewayError::AnalysisFailed(AnalysisError::Generation(_)) => {
                (StatusCode::BAD_GATEWAY, "provider_error")
            }
            GatewayError::AnalysisFailed(AnalysisError::Gate(_)) => {
                (StatusCode::BAD_GATEWAY, "model_error")
            }
            GatewayError::AnalysisFailed(AnalysisError::Task { .. }) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            CLARITY_STATUS_HEADER,
            HeaderValue::from_static(clarity_status),
        );

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
