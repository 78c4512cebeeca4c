// Presentation layer - HTTP surface for the dashboard and other consumers
pub mod api_error;
pub mod app_state;
pub mod handlers;
pub mod payloads;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    dataset_summary, field_trends, health_check, model_status, predict,
};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/model", get(model_status))
        .route("/predict", post(predict))
        .route("/dataset/summary", get(dataset_summary))
        .route("/fields/:id/trends", get(field_trends))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
