use super::PipelineError;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Ordinary least squares with an intercept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearRegression {
    /// Fits on centered data via SVD, so rank-deficient designs (one-hot
    /// blocks, perfectly correlated categories) get the minimum-norm solution.
    pub fn fit(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<Self, PipelineError> {
        let (n, p) = x.shape();
        if n == 0 {
            return Err(PipelineError::EmptyTrainingSet);
        }
        if y.len() != n {
            return Err(PipelineError::Solve(format!(
                "{} targets for {} samples",
                y.len(),
                n
            )));
        }

        let x_mean: Vec<f64> = x.column_iter().map(|c| c.mean()).collect();
        let mut centered = x.clone();
        for (mut column, m) in centered.column_iter_mut().zip(&x_mean) {
            column.add_scalar_mut(-m);
        }
        let y_mean = y.mean();
        let y_centered = y.add_scalar(-y_mean);

        let svd = centered.svd(true, true);
        let cutoff = svd.singular_values.max() * f64::EPSILON * n.max(p) as f64;
        let weights = svd
            .solve(&y_centered, cutoff)
            .map_err(|e| PipelineError::Solve(e.to_string()))?;

        let coefficients: Vec<f64> = weights.iter().copied().collect();
        let intercept = y_mean
            - coefficients
                .iter()
                .zip(&x_mean)
                .map(|(w, m)| w * m)
                .sum::<f64>();

        Ok(Self {
            coefficients,
            intercept,
        })
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn predict(&self, features: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(w, x)| w * x)
                .sum::<f64>()
    }
}
