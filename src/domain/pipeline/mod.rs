//! Feature pipeline: numeric standardization plus one-hot categories, fed
//! into a least-squares regression.
//!
//! Everything is learned from the rows passed to [`FittedPipeline::fit`]. The
//! caller decides what those rows are; training passes only the earliest
//! split so evaluation statistics never leak into the scaler or vocabulary.

pub mod encoder;
pub mod metrics;
pub mod regression;
pub mod scaler;

use crate::domain::reading::{FeatureRow, LabeledRow, NUMERIC_FEATURES, TARGET_COLUMN};
use encoder::OneHotEncoder;
use metrics::{Metrics, mean_absolute_error, r2_score};
use nalgebra::{DMatrix, DVector};
use regression::LinearRegression;
use scaler::StandardScaler;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("cannot fit on an empty training set")]
    EmptyTrainingSet,

    #[error("cannot evaluate on an empty set")]
    EmptyEvaluationSet,

    #[error("column `{column}` holds a non-finite value")]
    NonFinite { column: &'static str },

    #[error("least-squares solve failed: {0}")]
    Solve(String),
}

/// Immutable once fit. Shared read-only between prediction callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedPipeline {
    scaler: StandardScaler,
    encoder: OneHotEncoder,
    regression: LinearRegression,
}

impl FittedPipeline {
    pub fn fit(rows: &[LabeledRow]) -> Result<Self, PipelineError> {
        if rows.is_empty() {
            return Err(PipelineError::EmptyTrainingSet);
        }

        let features: Vec<FeatureRow> = rows.iter().map(|r| r.reading.features()).collect();
        for row in &features {
            check_finite(row)?;
        }
        if rows.iter().any(|r| !r.need_liters_next_24h.is_finite()) {
            return Err(PipelineError::NonFinite {
                column: TARGET_COLUMN,
            });
        }

        let numeric: Vec<[f64; 5]> = features.iter().map(FeatureRow::numeric).collect();
        let categorical: Vec<[&str; 2]> = features.iter().map(FeatureRow::categorical).collect();
        let scaler = StandardScaler::fit(&numeric);
        let encoder = OneHotEncoder::fit(&categorical);

        let width = scaler.width() + encoder.width();
        let mut flat = Vec::with_capacity(rows.len() * width);
        for row in &features {
            encode_into(&scaler, &encoder, row, &mut flat);
        }
        let x = DMatrix::from_row_slice(rows.len(), width, &flat);
        let y = DVector::from_iterator(rows.len(), rows.iter().map(|r| r.need_liters_next_24h));

        let regression = LinearRegression::fit(&x, &y)?;

        Ok(Self {
            scaler,
            encoder,
            regression,
        })
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn encoder(&self) -> &OneHotEncoder {
        &self.encoder
    }

    /// Width of the encoded feature vector.
    pub fn feature_width(&self) -> usize {
        self.scaler.width() + self.encoder.width()
    }

    pub fn transform(&self, row: &FeatureRow) -> Result<Vec<f64>, PipelineError> {
        check_finite(row)?;
        let mut out = Vec::with_capacity(self.feature_width());
        encode_into(&self.scaler, &self.encoder, row, &mut out);
        Ok(out)
    }

    pub fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>, PipelineError> {
        rows.iter()
            .map(|row| Ok(self.regression.predict(&self.transform(row)?)))
            .collect()
    }

    pub fn evaluate(&self, held_out: &[LabeledRow]) -> Result<Metrics, PipelineError> {
        if held_out.is_empty() {
            return Err(PipelineError::EmptyEvaluationSet);
        }

        let features: Vec<FeatureRow> = held_out.iter().map(|r| r.reading.features()).collect();
        let predicted = self.predict(&features)?;
        let actual: Vec<f64> = held_out.iter().map(|r| r.need_liters_next_24h).collect();

        Ok(Metrics {
            mae: mean_absolute_error(&actual, &predicted),
            r2: r2_score(&actual, &predicted),
        })
    }
}

fn encode_into(
    scaler: &StandardScaler,
    encoder: &OneHotEncoder,
    row: &FeatureRow,
    out: &mut Vec<f64>,
) {
    scaler.transform_into(&row.numeric(), out);
    encoder.encode_into(&row.categorical(), out);
}

fn check_finite(row: &FeatureRow) -> Result<(), PipelineError> {
    match row
        .numeric()
        .iter()
        .zip(NUMERIC_FEATURES)
        .find(|(v, _)| !v.is_finite())
    {
        Some((_, column)) => Err(PipelineError::NonFinite { column }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::tests::row;

    fn training_rows() -> Vec<LabeledRow> {
        let mut rows: Vec<_> = (0..24)
            .map(|h| row("field_1", h, 10.0 + 2.5 * h as f64))
            .collect();
        for (i, r) in rows.iter_mut().enumerate() {
            r.reading.rainfall_mm = (i % 3) as f64 * 2.0;
            r.reading.wind_speed_ms = 6.0 + (i % 5) as f64;
            if i % 2 == 0 {
                r.reading.soil_type = "sandy".to_string();
            }
        }
        rows
    }

    #[test]
    fn test_fit_learns_from_given_rows_only() {
        let rows = training_rows();
        let pipeline = FittedPipeline::fit(&rows[..12]).unwrap();

        let expected_mean = rows[..12]
            .iter()
            .map(|r| r.reading.soil_moisture_pct)
            .sum::<f64>()
            / 12.0;
        assert_eq!(pipeline.scaler().mean()[0], expected_mean);
        assert_eq!(pipeline.feature_width(), 5 + 2 + 1);
    }

    #[test]
    fn test_predictions_track_the_target() {
        let rows = training_rows();
        let pipeline = FittedPipeline::fit(&rows).unwrap();
        let metrics = pipeline.evaluate(&rows).unwrap();

        assert!(metrics.mae.is_finite());
        assert!(metrics.mae >= 0.0);
        assert!(metrics.r2 > 0.5);
    }

    #[test]
    fn test_unseen_category_predicts_finite() {
        let pipeline = FittedPipeline::fit(&training_rows()).unwrap();
        let mut features = training_rows()[0].reading.features();
        features.soil_type = "clay".to_string();
        features.crop_stage = "harvest".to_string();

        let predictions = pipeline.predict(&[features]).unwrap();
        assert_eq!(predictions.len(), 1);
        assert!(predictions[0].is_finite());
    }

    #[test]
    fn test_non_finite_input_is_rejected() {
        let pipeline = FittedPipeline::fit(&training_rows()).unwrap();
        let mut features = training_rows()[0].reading.features();
        features.humidity_pct = f64::NAN;

        assert!(matches!(
            pipeline.predict(&[features]),
            Err(PipelineError::NonFinite {
                column: "humidity_pct"
            })
        ));
    }

    #[test]
    fn test_empty_sets_are_rejected() {
        assert!(matches!(
            FittedPipeline::fit(&[]),
            Err(PipelineError::EmptyTrainingSet)
        ));

        let pipeline = FittedPipeline::fit(&training_rows()).unwrap();
        assert!(matches!(
            pipeline.evaluate(&[]),
            Err(PipelineError::EmptyEvaluationSet)
        ));
    }
}
