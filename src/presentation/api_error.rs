// HTTP error responses for the dashboard collaborator
use crate::domain::error::{DataError, PredictionError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    /// No artifact yet. Expected before the first training run.
    ModelUnavailable,
    MissingColumns(Vec<String>),
    PredictionFailed(String),
    InvalidOverride(String),
    InvalidQuery(String),
    /// The persisted dataset exists but cannot be used as-is.
    InvalidData(String),
    NoData,
    NotFound(String),
    Internal(String),
}

impl From<PredictionError> for ApiError {
    fn from(err: PredictionError) -> Self {
        match err {
            PredictionError::MissingColumns(missing) => ApiError::MissingColumns(missing),
            PredictionError::Failed(cause) => ApiError::PredictionFailed(cause),
        }
    }
}

impl From<DataError> for ApiError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::MissingDataFile(_) => ApiError::NoData,
            DataError::MissingColumns(missing) => ApiError::MissingColumns(missing),
            malformed @ DataError::Malformed { .. } => {
                ApiError::InvalidData(malformed.to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::ModelUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({ "error": "model unavailable", "detail": "train the model first" }),
            ),
            ApiError::MissingColumns(missing) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": "missing columns", "missing": missing }),
            ),
            ApiError::PredictionFailed(cause) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": "prediction failed", "detail": cause }),
            ),
            ApiError::InvalidOverride(detail) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "invalid override", "detail": detail }),
            ),
            ApiError::InvalidQuery(detail) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "invalid query", "detail": detail }),
            ),
            ApiError::InvalidData(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": "invalid dataset", "detail": detail }),
            ),
            ApiError::NoData => (
                StatusCode::NOT_FOUND,
                json!({ "error": "no data", "detail": "run generation first" }),
            ),
            ApiError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                json!({ "error": "not found", "detail": what }),
            ),
            ApiError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
