// Dataset service - Use cases for KPI summaries and field trends
use crate::application::repository::DatasetRepository;
use crate::domain::dataset::DatasetSummary;
use crate::domain::error::DataError;
use crate::domain::reading::LabeledRow;
use crate::domain::trend::{TrendSeries, field_trends};
use std::sync::Arc;

#[derive(Clone)]
pub struct DatasetService {
    repository: Arc<dyn DatasetRepository>,
}

impl DatasetService {
    pub fn new(repository: Arc<dyn DatasetRepository>) -> Self {
        Self { repository }
    }

    pub fn summary(&self) -> Result<Option<DatasetSummary>, DataError> {
        Ok(self.repository.load()?.summary())
    }

    /// Downsampled series for one field, or None if the field is unknown.
    pub fn field_trends(
        &self,
        field_id: &str,
        max_points: usize,
    ) -> Result<Option<Vec<TrendSeries>>, DataError> {
        let dataset = self.repository.load()?;
        let rows: Vec<&LabeledRow> = dataset.field_rows(field_id).collect();
        if rows.is_empty() {
            return Ok(None);
        }
        Ok(Some(field_trends(&rows, max_points)))
    }
}
