// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use irrigation_forecast::application::dataset_service::DatasetService;
use irrigation_forecast::application::prediction_service::PredictionService;
use irrigation_forecast::infrastructure::config::load_app_config;
use irrigation_forecast::infrastructure::csv_dataset_repository::CsvDatasetRepository;
use irrigation_forecast::infrastructure::json_artifact_repository::JsonArtifactRepository;
use irrigation_forecast::infrastructure::logging::init_tracing;
use irrigation_forecast::presentation::app_state::AppState;
use irrigation_forecast::presentation::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = load_app_config()?;

    // Repositories (infrastructure layer)
    let datasets = Arc::new(CsvDatasetRepository::new(config.paths.dataset));
    let artifacts = Arc::new(JsonArtifactRepository::new(config.paths.model));

    // Services (application layer)
    let prediction_service = Arc::new(PredictionService::new(artifacts));
    if prediction_service.load().is_none() {
        tracing::warn!("No model available yet; predictions will report it until training runs");
    }
    let dataset_service = DatasetService::new(datasets);

    let state = Arc::new(AppState {
        prediction_service,
        dataset_service,
    });

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("invalid bind address {}", config.server.bind))?;
    tracing::info!("Starting irrigation-forecast service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router(state)).await?;

    Ok(())
}
