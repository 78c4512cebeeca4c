// Error taxonomy shared by the data, training and serving paths
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("no data at {0}; run generation first")]
    MissingDataFile(PathBuf),

    #[error("missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("row {row}: column `{column}`: {reason}")]
    Malformed {
        row: usize,
        column: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Failures of a prediction call. A missing model is not one of them: it is
/// reported as `Ok(None)` by the prediction service.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("prediction failed: {0}")]
    Failed(String),
}
