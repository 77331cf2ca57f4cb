//! API error type and its JSON rendering.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use quake_facade::QuakeError;
use serde_json::json;
use thiserror::Error;

/// Every failure a handler can report.
///
/// Rendered as a JSON object with an `error` key; some variants add keys.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Not enough earthquake data for a reliable forecast")]
    InsufficientData {
        required: usize,
        found: usize,
        country: Option<String>,
    },

    #[error("The forecast model is not available right now")]
    ModelUnavailable,

    #[error("Earthquake catalog request failed: {0}")]
    Upstream(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Forecast failed: {0}")]
    Internal(String),
}

impl ApiError {
    /// Attach the requested country to an insufficient-data error.
    pub fn for_country(self, name: &str) -> Self {
        match self {
            ApiError::InsufficientData { required, found, .. } => ApiError::InsufficientData {
                required,
                found,
                country: Some(name.to_string()),
            },
            other => other,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InsufficientData { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ModelUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<QuakeError> for ApiError {
    fn from(err: QuakeError) -> Self {
        match err {
            QuakeError::InsufficientData { required, actual } => ApiError::InsufficientData {
                required,
                found: actual,
                country: None,
            },
            QuakeError::Upstream { status, body } => {
                tracing::warn!(status, body = %body, "Catalog returned an error page");
                ApiError::Upstream(format!("catalog returned HTTP {}", status))
            }
            QuakeError::RequestFailed(_) | QuakeError::ParseError(_) => ApiError::Upstream(err.to_string()),
            QuakeError::InvalidParameter { .. } => ApiError::BadRequest(err.to_string()),
            QuakeError::ModelLoad { .. } => ApiError::ModelUnavailable,
            QuakeError::Model(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Upstream(msg) => tracing::warn!(error = %msg, "Upstream failure"),
            ApiError::Internal(msg) => tracing::error!(error = %msg, "Forecast failure"),
            _ => {}
        }

        let body = match &self {
            ApiError::InsufficientData {
                required,
                found,
                country: Some(country),
            } => json!({
                "error": format!("Not enough earthquake data found for '{}'", country),
                "country": country,
                "quakes_found": found,
                "required": required,
            }),
            ApiError::InsufficientData {
                required, found, ..
            } => json!({
                "error": self.to_string(),
                "quakes_found": found,
                "required": required,
            }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
