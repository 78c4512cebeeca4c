// Prediction service - Use case for serving the trained model
use crate::application::repository::ArtifactRepository;
use crate::domain::artifact::ModelArtifact;
use crate::domain::error::PredictionError;
use crate::domain::feature_table::FeatureTable;
use crate::domain::reading::{FeatureRow, ScenarioOverride};
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Loads the artifact at most once per process and serves predictions from
/// the shared read-only instance.
pub struct PredictionService {
    artifacts: Arc<dyn ArtifactRepository>,
    model: OnceCell<Arc<ModelArtifact>>,
}

impl PredictionService {
    pub fn new(artifacts: Arc<dyn ArtifactRepository>) -> Self {
        Self {
            artifacts,
            model: OnceCell::new(),
        }
    }

    /// The loaded model, or None while no artifact exists. Absence is not
    /// cached: a later call picks up an artifact written in the meantime.
    /// Concurrent first calls load once; the others observe that instance.
    pub fn load(&self) -> Option<Arc<ModelArtifact>> {
        self.model
            .get_or_try_init(|| match self.artifacts.load() {
                Some(artifact) => {
                    tracing::info!(
                        "Loaded model artifact trained at {} on {} rows",
                        artifact.trained_at,
                        artifact.train_rows
                    );
                    Ok(Arc::new(artifact))
                }
                None => Err(()),
            })
            .ok()
            .cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.model.get().is_some()
    }

    /// `Ok(None)` means no model is available yet (train first).
    pub fn predict(&self, rows: &[FeatureRow]) -> Result<Option<Vec<f64>>, PredictionError> {
        let Some(model) = self.load() else {
            return Ok(None);
        };

        model.pipeline.predict(rows).map(Some).map_err(|e| {
            tracing::warn!("Prediction failed: {}", e);
            PredictionError::Failed(e.to_string())
        })
    }

    /// Checks the column contract before touching the model, applies the
    /// caller's scenario to every row, then predicts.
    pub fn predict_table(
        &self,
        table: &FeatureTable,
        scenario: &ScenarioOverride,
    ) -> Result<Option<Vec<f64>>, PredictionError> {
        let rows: Vec<FeatureRow> = table
            .to_feature_rows()?
            .into_iter()
            .map(|row| row.with_override(scenario))
            .collect();
        self.predict(&rows)
    }
}
