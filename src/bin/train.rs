// Batch job: fit the pipeline on the persisted dataset and replace the artifact
use std::sync::Arc;

use irrigation_forecast::application::training_service::{TrainingError, TrainingService};
use irrigation_forecast::domain::error::DataError;
use irrigation_forecast::infrastructure::config::load_app_config;
use irrigation_forecast::infrastructure::csv_dataset_repository::CsvDatasetRepository;
use irrigation_forecast::infrastructure::json_artifact_repository::JsonArtifactRepository;
use irrigation_forecast::infrastructure::logging::init_tracing;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = load_app_config()?;
    let service = TrainingService::new(
        Arc::new(CsvDatasetRepository::new(&config.paths.dataset)),
        Arc::new(JsonArtifactRepository::new(&config.paths.model)),
        config.training.train_fraction,
    );

    match service.train() {
        Ok(report) => {
            tracing::info!(
                "Trained on {} rows, evaluated on {}",
                report.train_rows,
                report.eval_rows
            );
            Ok(())
        }
        Err(TrainingError::Data(DataError::MissingDataFile(path))) => {
            tracing::error!("No data at {}; run irrigation-simulate first", path.display());
            std::process::exit(2);
        }
        Err(e) => Err(e.into()),
    }
}
