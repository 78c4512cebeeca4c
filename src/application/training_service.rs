// Training service - Use case for fitting and persisting the model
use crate::application::repository::{ArtifactRepository, DatasetRepository};
use crate::domain::artifact::ModelArtifact;
use crate::domain::dataset::Dataset;
use crate::domain::error::DataError;
use crate::domain::pipeline::metrics::Metrics;
use crate::domain::pipeline::{FittedPipeline, PipelineError};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrainingError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("failed to save model artifact: {0}")]
    Persist(#[source] std::io::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    /// Index of the first evaluation row.
    pub split_index: usize,
    pub train_rows: usize,
    pub eval_rows: usize,
    pub metrics: Option<Metrics>,
}

#[derive(Clone)]
pub struct TrainingService {
    datasets: Arc<dyn DatasetRepository>,
    artifacts: Arc<dyn ArtifactRepository>,
    train_fraction: f64,
}

impl TrainingService {
    pub fn new(
        datasets: Arc<dyn DatasetRepository>,
        artifacts: Arc<dyn ArtifactRepository>,
        train_fraction: f64,
    ) -> Self {
        Self {
            datasets,
            artifacts,
            train_fraction,
        }
    }

    /// Loads the persisted dataset, fits on the earliest split, evaluates on
    /// the rest and replaces the stored artifact.
    pub fn train(&self) -> Result<TrainingReport, TrainingError> {
        let dataset = self.datasets.load()?;
        tracing::info!("Loaded dataset with {} rows", dataset.len());

        let (artifact, report) = fit_artifact(&dataset, self.train_fraction)?;
        self.artifacts
            .save(&artifact)
            .map_err(TrainingError::Persist)?;

        Ok(report)
    }
}

/// Time-ordered split, fit on the training part, metrics on the held-out part.
pub fn fit_artifact(
    dataset: &Dataset,
    train_fraction: f64,
) -> Result<(ModelArtifact, TrainingReport), PipelineError> {
    let split_index = dataset.split_index(train_fraction);
    let (train, held_out) = dataset.time_split(train_fraction);
    tracing::info!(
        "Split at row {}: {} training rows, {} evaluation rows",
        split_index,
        train.len(),
        held_out.len()
    );

    let pipeline = FittedPipeline::fit(train)?;

    let metrics = if held_out.is_empty() {
        tracing::warn!("Evaluation split is empty; skipping metrics");
        None
    } else {
        let metrics = pipeline.evaluate(held_out)?;
        tracing::info!("Test MAE: {:.2} | R2: {:.3}", metrics.mae, metrics.r2);
        Some(metrics)
    };

    let report = TrainingReport {
        split_index,
        train_rows: train.len(),
        eval_rows: held_out.len(),
        metrics,
    };
    let artifact = ModelArtifact::new(pipeline, train.len(), held_out.len(), metrics);

    Ok((artifact, report))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::application::series_generator::SeriesGenerator;
    use crate::domain::field::FieldSpec;
    use crate::domain::pipeline::scaler::StandardScaler;
    use crate::domain::reading::FeatureRow;
    use crate::infrastructure::csv_dataset_repository::CsvDatasetRepository;
    use crate::infrastructure::json_artifact_repository::JsonArtifactRepository;
    use chrono::NaiveDate;

    pub(crate) fn demo_dataset() -> Dataset {
        let start = NaiveDate::from_ymd_opt(2025, 4, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        SeriesGenerator::new(start, 1440)
            .unwrap()
            .generate_fields(&FieldSpec::defaults(), 42)
    }

    #[test]
    fn test_split_boundary_is_eighty_percent() {
        let dataset = demo_dataset();
        let (_, report) = fit_artifact(&dataset, 0.8).unwrap();

        assert_eq!(report.split_index, (0.8 * 2880.0_f64).floor() as usize);
        assert_eq!(report.split_index, 2304);
        assert_eq!(report.train_rows, 2304);
        assert_eq!(report.eval_rows, 576);
    }

    #[test]
    fn test_split_preserves_time_order_per_field() {
        let dataset = demo_dataset();
        let (train, held_out) = dataset.time_split(0.8);

        for eval_row in held_out {
            let field = &eval_row.reading.field_id;
            assert!(
                train
                    .iter()
                    .filter(|t| &t.reading.field_id == field)
                    .all(|t| t.reading.timestamp < eval_row.reading.timestamp)
            );
        }
    }

    #[test]
    fn test_scaler_statistics_come_from_training_split_only() {
        let dataset = demo_dataset();
        let (artifact, _) = fit_artifact(&dataset, 0.8).unwrap();
        let (train, _) = dataset.time_split(0.8);

        let numeric = |rows: &[crate::domain::reading::LabeledRow]| -> Vec<[f64; 5]> {
            rows.iter().map(|r| r.reading.features().numeric()).collect()
        };
        let train_only = StandardScaler::fit(&numeric(train));
        let full = StandardScaler::fit(&numeric(dataset.rows()));

        assert_eq!(artifact.pipeline.scaler(), &train_only);
        assert_ne!(artifact.pipeline.scaler(), &full);
    }

    #[test]
    fn test_end_to_end_scenario() {
        let dataset = demo_dataset();
        assert_eq!(dataset.len(), 2880);
        assert_eq!(dataset.field_ids(), vec!["field_1", "field_2"]);
        assert!(dataset.rows().iter().all(|r| {
            let f = r.reading.features();
            f.numeric().iter().all(|v| v.is_finite())
                && !f.soil_type.is_empty()
                && !f.crop_stage.is_empty()
                && r.need_liters_next_24h.is_finite()
        }));

        let (artifact, report) = fit_artifact(&dataset, 0.8).unwrap();
        let metrics = report.metrics.unwrap();
        assert!(metrics.mae.is_finite());
        assert!(metrics.mae >= 0.0);

        let first_eval: FeatureRow = dataset.rows()[report.split_index].reading.features();
        let prediction = artifact.pipeline.predict(&[first_eval]).unwrap();
        assert_eq!(prediction.len(), 1);
        assert!(prediction[0].is_finite());
        assert!(prediction[0] >= 0.0);
    }

    #[test]
    fn test_train_persists_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let datasets = Arc::new(CsvDatasetRepository::new(dir.path().join("data.csv")));
        let artifacts = Arc::new(JsonArtifactRepository::new(dir.path().join("model.json")));
        datasets.save(&demo_dataset()).unwrap();

        let service = TrainingService::new(datasets, artifacts.clone(), 0.8);
        let report = service.train().unwrap();

        let stored = artifacts.load().unwrap();
        assert_eq!(stored.train_rows, report.train_rows);
        assert_eq!(stored.eval_rows, 576);
        let (stored, reported) = (stored.metrics.unwrap(), report.metrics.unwrap());
        assert!((stored.mae - reported.mae).abs() < 1e-9);
        assert!((stored.r2 - reported.r2).abs() < 1e-9);
    }

    #[test]
    fn test_train_without_data_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let service = TrainingService::new(
            Arc::new(CsvDatasetRepository::new(dir.path().join("absent.csv"))),
            Arc::new(JsonArtifactRepository::new(dir.path().join("model.json"))),
            0.8,
        );

        match service.train() {
            Err(TrainingError::Data(DataError::MissingDataFile(path))) => {
                assert!(path.ends_with("absent.csv"))
            }
            other => panic!("expected missing data file, got {:?}", other),
        }
    }
}
