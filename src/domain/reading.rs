// Sensor reading domain models
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Format used when writing timestamps to the dataset file.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Accepted when reading; `%.f` also matches a missing fraction.
pub const TIMESTAMP_PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

pub const NUMERIC_FEATURES: [&str; 5] = [
    "soil_moisture_pct",
    "air_temp_c",
    "humidity_pct",
    "rainfall_mm",
    "wind_speed_ms",
];
pub const CATEGORICAL_FEATURES: [&str; 2] = ["soil_type", "crop_stage"];
pub const TARGET_COLUMN: &str = "need_liters_next_24h";

/// Column layout of a persisted dataset, target last.
pub const DATASET_COLUMNS: [&str; 10] = [
    "timestamp",
    "field_id",
    "soil_moisture_pct",
    "air_temp_c",
    "humidity_pct",
    "rainfall_mm",
    "wind_speed_ms",
    "soil_type",
    "crop_stage",
    TARGET_COLUMN,
];

/// The seven columns a prediction request must carry.
pub fn feature_columns() -> impl Iterator<Item = &'static str> {
    NUMERIC_FEATURES.into_iter().chain(CATEGORICAL_FEATURES)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    pub timestamp: NaiveDateTime,
    pub field_id: String,
    pub soil_moisture_pct: f64,
    pub air_temp_c: f64,
    pub humidity_pct: f64,
    pub rainfall_mm: f64,
    pub wind_speed_ms: f64,
    pub soil_type: String,
    pub crop_stage: String,
}

impl SensorReading {
    pub fn features(&self) -> FeatureRow {
        FeatureRow {
            soil_moisture_pct: self.soil_moisture_pct,
            air_temp_c: self.air_temp_c,
            humidity_pct: self.humidity_pct,
            rainfall_mm: self.rainfall_mm,
            wind_speed_ms: self.wind_speed_ms,
            soil_type: self.soil_type.clone(),
            crop_stage: self.crop_stage.clone(),
        }
    }
}

/// A reading plus its irrigation-need target.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledRow {
    pub reading: SensorReading,
    pub need_liters_next_24h: f64,
}

impl LabeledRow {
    pub fn new(reading: SensorReading, need_liters_next_24h: f64) -> Self {
        Self {
            reading,
            need_liters_next_24h,
        }
    }
}

/// One model input row: the seven feature columns, nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub soil_moisture_pct: f64,
    pub air_temp_c: f64,
    pub humidity_pct: f64,
    pub rainfall_mm: f64,
    pub wind_speed_ms: f64,
    pub soil_type: String,
    pub crop_stage: String,
}

impl FeatureRow {
    /// Numeric values in `NUMERIC_FEATURES` order.
    pub fn numeric(&self) -> [f64; 5] {
        [
            self.soil_moisture_pct,
            self.air_temp_c,
            self.humidity_pct,
            self.rainfall_mm,
            self.wind_speed_ms,
        ]
    }

    /// Categorical values in `CATEGORICAL_FEATURES` order.
    pub fn categorical(&self) -> [&str; 2] {
        [&self.soil_type, &self.crop_stage]
    }

    /// Applies a what-if scenario. Values are substituted as given; rejecting
    /// implausible overrides is up to the caller.
    pub fn with_override(mut self, scenario: &ScenarioOverride) -> Self {
        if let Some(v) = scenario.soil_moisture_pct {
            self.soil_moisture_pct = v;
        }
        if let Some(v) = scenario.air_temp_c {
            self.air_temp_c = v;
        }
        if let Some(v) = scenario.humidity_pct {
            self.humidity_pct = v;
        }
        if let Some(v) = scenario.rainfall_mm {
            self.rainfall_mm = v;
        }
        if let Some(v) = scenario.wind_speed_ms {
            self.wind_speed_ms = v;
        }
        self
    }
}

/// Caller-supplied substitutions for a what-if prediction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioOverride {
    pub soil_moisture_pct: Option<f64>,
    pub air_temp_c: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub rainfall_mm: Option<f64>,
    pub wind_speed_ms: Option<f64>,
}

impl ScenarioOverride {
    pub fn rainfall(mm: f64) -> Self {
        Self {
            rainfall_mm: Some(mm),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> FeatureRow {
        FeatureRow {
            soil_moisture_pct: 30.0,
            air_temp_c: 21.5,
            humidity_pct: 60.0,
            rainfall_mm: 0.0,
            wind_speed_ms: 7.2,
            soil_type: "loam".to_string(),
            crop_stage: "vegetative".to_string(),
        }
    }

    #[test]
    fn test_feature_columns_cover_numeric_then_categorical() {
        let columns: Vec<_> = feature_columns().collect();
        assert_eq!(columns.len(), 7);
        assert_eq!(columns[0], "soil_moisture_pct");
        assert_eq!(columns[6], "crop_stage");
    }

    #[test]
    fn test_override_only_touches_given_values() {
        let row = sample_row().with_override(&ScenarioOverride::rainfall(10.0));
        assert_eq!(row.rainfall_mm, 10.0);
        assert_eq!(row.air_temp_c, 21.5);
        assert_eq!(row.soil_type, "loam");
    }

    #[test]
    fn test_empty_override_is_identity() {
        let scenario = ScenarioOverride::default();
        assert!(scenario.is_empty());
        assert_eq!(sample_row().with_override(&scenario), sample_row());
    }
}
