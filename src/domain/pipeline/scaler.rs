use serde::{Deserialize, Serialize};

/// Per-column standardization to zero mean and unit variance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Learns population mean and standard deviation per column. Constant
    /// columns get a scale of 1 so they map to zero instead of NaN.
    pub fn fit<const N: usize>(samples: &[[f64; N]]) -> Self {
        if samples.is_empty() {
            return Self {
                mean: vec![0.0; N],
                scale: vec![1.0; N],
            };
        }

        let n = samples.len() as f64;
        let mut mean = vec![0.0; N];
        for sample in samples {
            for (m, v) in mean.iter_mut().zip(sample) {
                *m += v;
            }
        }
        mean.iter_mut().for_each(|m| *m /= n);

        let mut var = vec![0.0; N];
        for sample in samples {
            for ((acc, v), m) in var.iter_mut().zip(sample).zip(&mean) {
                *acc += (v - m).powi(2);
            }
        }

        let scale = var
            .into_iter()
            .map(|acc| {
                let std = (acc / n).sqrt();
                if std < 10.0 * f64::EPSILON { 1.0 } else { std }
            })
            .collect();

        Self { mean, scale }
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64] {
        &self.scale
    }

    pub fn width(&self) -> usize {
        self.mean.len()
    }

    pub fn transform_into(&self, values: &[f64], out: &mut Vec<f64>) {
        out.extend(
            values
                .iter()
                .zip(self.mean.iter().zip(&self.scale))
                .map(|(v, (m, s))| (v - m) / s),
        );
    }
}
