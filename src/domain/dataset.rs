// Dataset domain model
use super::reading::LabeledRow;
use serde::Serialize;

pub const DEFAULT_TRAIN_FRACTION: f64 = 0.8;

/// Labeled rows sorted by (field_id, timestamp). Read-only once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<LabeledRow>,
}

/// Averages shown as KPI cards by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub rows: usize,
    pub mean_air_temp_c: f64,
    pub mean_soil_moisture_pct: f64,
    pub mean_wind_speed_ms: f64,
    pub mean_humidity_pct: f64,
}

impl Dataset {
    /// Builds a dataset, sorting rows by (field_id, timestamp). The sort is
    /// stable so rows sharing a key keep their input order.
    pub fn from_rows(mut rows: Vec<LabeledRow>) -> Self {
        rows.sort_by(|a, b| {
            a.reading
                .field_id
                .cmp(&b.reading.field_id)
                .then(a.reading.timestamp.cmp(&b.reading.timestamp))
        });
        Self { rows }
    }

    pub fn rows(&self) -> &[LabeledRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the first row whose (field_id, timestamp) repeats the row
    /// before it. A well-formed dataset has none.
    pub fn first_duplicate(&self) -> Option<usize> {
        self.rows
            .windows(2)
            .position(|w| {
                w[0].reading.field_id == w[1].reading.field_id
                    && w[0].reading.timestamp == w[1].reading.timestamp
            })
            .map(|i| i + 1)
    }

    /// Distinct field ids in sorted order.
    pub fn field_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .rows
            .iter()
            .map(|r| r.reading.field_id.as_str())
            .collect();
        ids.dedup();
        ids
    }

    pub fn field_rows<'a>(&'a self, field_id: &'a str) -> impl Iterator<Item = &'a LabeledRow> {
        self.rows
            .iter()
            .filter(move |r| r.reading.field_id == field_id)
    }

    /// First evaluation row index: `floor(train_fraction * len)`.
    pub fn split_index(&self, train_fraction: f64) -> usize {
        let fraction = train_fraction.clamp(0.0, 1.0);
        ((self.rows.len() as f64) * fraction).floor() as usize
    }

    /// Time-ordered split without shuffling: the earliest rows train, the
    /// trailing rows evaluate.
    pub fn time_split(&self, train_fraction: f64) -> (&[LabeledRow], &[LabeledRow]) {
        self.rows.split_at(self.split_index(train_fraction))
    }

    pub fn summary(&self) -> Option<DatasetSummary> {
        if self.rows.is_empty() {
            return None;
        }

        let n = self.rows.len() as f64;
        let mean = |f: fn(&LabeledRow) -> f64| self.rows.iter().map(f).sum::<f64>() / n;

        Some(DatasetSummary {
            rows: self.rows.len(),
            mean_air_temp_c: mean(|r| r.reading.air_temp_c),
            mean_soil_moisture_pct: mean(|r| r.reading.soil_moisture_pct),
            mean_wind_speed_ms: mean(|r| r.reading.wind_speed_ms),
            mean_humidity_pct: mean(|r| r.reading.humidity_pct),
        })
    }
}
