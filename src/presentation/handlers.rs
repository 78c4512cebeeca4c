// HTTP request handlers
use crate::domain::dataset::DatasetSummary;
use crate::presentation::api_error::ApiError;
use crate::presentation::app_state::AppState;
use crate::presentation::payloads::{
    FieldTrends, ModelStatus, PredictRequest, PredictResponse, TrendQuery,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;
use std::time::Instant;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Whether a model is available, and how it scored
pub async fn model_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ModelStatus>, ApiError> {
    let service = state.prediction_service.clone();
    let artifact = tokio::task::spawn_blocking(move || service.load())
        .await
        .map_err(|e| ApiError::Internal(format!("model load task failed: {}", e)))?;
    Ok(Json(ModelStatus::from_artifact(artifact.as_deref())))
}

/// Predict irrigation need for one or more feature rows
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    request
        .validate_scenario()
        .map_err(ApiError::InvalidOverride)?;

    let service = state.prediction_service.clone();
    let started = Instant::now();
    let outcome = tokio::task::spawn_blocking(move || {
        service.predict_table(&request.features, &request.scenario)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("prediction task failed: {}", e)))?;

    match outcome {
        Ok(Some(predictions)) => {
            let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
            tracing::debug!(
                "Predicted {} rows in {:.1} ms",
                predictions.len(),
                elapsed_ms
            );
            Ok(Json(PredictResponse {
                predictions,
                elapsed_ms,
            }))
        }
        Ok(None) => Err(ApiError::ModelUnavailable),
        Err(e) => Err(e.into()),
    }
}

/// KPI averages over the persisted dataset
pub async fn dataset_summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DatasetSummary>, ApiError> {
    let service = state.dataset_service.clone();
    let summary = tokio::task::spawn_blocking(move || service.summary())
        .await
        .map_err(|e| ApiError::Internal(format!("summary task failed: {}", e)))??;

    summary.map(Json).ok_or(ApiError::NoData)
}

/// Downsampled moisture / temperature / humidity series for one field
pub async fn field_trends(
    Path(id): Path<String>,
    Query(query): Query<TrendQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<FieldTrends>, ApiError> {
    let max_points = query.max_points().map_err(ApiError::InvalidQuery)?;
    let service = state.dataset_service.clone();
    let field_id = id.clone();
    let series = tokio::task::spawn_blocking(move || service.field_trends(&field_id, max_points))
        .await
        .map_err(|e| ApiError::Internal(format!("trend task failed: {}", e)))??;

    match series {
        Some(series) => Ok(Json(FieldTrends {
            field_id: id,
            series,
        })),
        None => Err(ApiError::NotFound(format!("field {}", id))),
    }
}
