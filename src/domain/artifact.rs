// Model artifact: the unit of persistence and loading
use super::pipeline::FittedPipeline;
use super::pipeline::metrics::Metrics;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub trained_at: DateTime<Utc>,
    pub train_rows: usize,
    pub eval_rows: usize,
    /// Absent when the evaluation split was empty.
    pub metrics: Option<Metrics>,
    pub pipeline: FittedPipeline,
}

impl ModelArtifact {
    pub fn new(
        pipeline: FittedPipeline,
        train_rows: usize,
        eval_rows: usize,
        metrics: Option<Metrics>,
    ) -> Self {
        Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            trained_at: Utc::now(),
            train_rows,
            eval_rows,
            metrics,
            pipeline,
        }
    }

    pub fn is_supported(&self) -> bool {
        self.format_version == ARTIFACT_FORMAT_VERSION
    }
}
