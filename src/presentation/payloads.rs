// Request and response bodies of the HTTP surface
use crate::domain::artifact::ModelArtifact;
use crate::domain::feature_table::FeatureTable;
use crate::domain::pipeline::metrics::Metrics;
use crate::domain::reading::ScenarioOverride;
use crate::domain::trend::{DEFAULT_MAX_POINTS, TrendSeries};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub features: FeatureTable,
    #[serde(default)]
    pub scenario: ScenarioOverride,
}

impl PredictRequest {
    /// Rainfall and wind cannot be negative. The prediction service accepts
    /// whatever it is given, so the check lives here.
    pub fn validate_scenario(&self) -> Result<(), String> {
        let checks = [
            ("rainfall_mm", self.scenario.rainfall_mm),
            ("wind_speed_ms", self.scenario.wind_speed_ms),
        ];
        match checks
            .into_iter()
            .find(|(_, v)| v.is_some_and(|v| v < 0.0))
        {
            Some((name, _)) => Err(format!("{} override must not be negative", name)),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub predictions: Vec<f64>,
    pub elapsed_ms: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelStatus {
    pub available: bool,
    pub trained_at: Option<DateTime<Utc>>,
    pub train_rows: Option<usize>,
    pub metrics: Option<Metrics>,
}

impl ModelStatus {
    pub fn from_artifact(artifact: Option<&ModelArtifact>) -> Self {
        Self {
            available: artifact.is_some(),
            trained_at: artifact.map(|a| a.trained_at),
            train_rows: artifact.map(|a| a.train_rows),
            metrics: artifact.and_then(|a| a.metrics),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    pub max_points: Option<usize>,
}

impl TrendQuery {
    /// Requested point budget, or the default when none is given.
    pub fn max_points(&self) -> Result<usize, String> {
        match self.max_points {
            None => Ok(DEFAULT_MAX_POINTS),
            Some(0) => Err("max_points must be at least 1".to_string()),
            Some(n) => Ok(n),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FieldTrends {
    pub field_id: String,
    pub series: Vec<TrendSeries>,
}
