// Application state for HTTP handlers
use crate::application::dataset_service::DatasetService;
use crate::application::prediction_service::PredictionService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub prediction_service: Arc<PredictionService>,
    pub dataset_service: DatasetService,
}
