// Synthetic sensor series - one physically plausible hourly series per field
use crate::domain::dataset::Dataset;
use crate::domain::field::FieldSpec;
use crate::domain::label::label_all;
use crate::domain::moisture::{MoistureState, evapotranspiration};
use crate::domain::reading::SensorReading;
use chrono::{Duration, NaiveDateTime};
use rand::SeedableRng;
use rand::distributions::{Distribution, WeightedError, WeightedIndex};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;
use std::f64::consts::TAU;
use thiserror::Error;

const RAIN_LEVELS_MM: [f64; 7] = [0.0, 0.0, 0.0, 0.0, 2.0, 5.0, 10.0];
const RAIN_WEIGHTS: [f64; 7] = [0.55, 0.15, 0.10, 0.05, 0.07, 0.05, 0.03];

/// Full temperature / humidity cycles over one run.
const TEMP_CYCLES: f64 = 4.0;
const HUMIDITY_CYCLES: f64 = 3.0;
const HUMIDITY_PHASE: f64 = 1.0;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid rainfall distribution: {0}")]
    Rainfall(#[from] WeightedError),
}

#[derive(Debug, Clone)]
pub struct SeriesGenerator {
    start: NaiveDateTime,
    periods: usize,
    rainfall: WeightedIndex<f64>,
}

impl SeriesGenerator {
    pub fn new(start: NaiveDateTime, periods: usize) -> Result<Self, GenerationError> {
        Ok(Self {
            start,
            periods,
            rainfall: WeightedIndex::new(RAIN_WEIGHTS)?,
        })
    }

    /// Generates one field's hourly readings. Identical arguments give
    /// bit-identical output. Periods are produced strictly in time order
    /// because soil moisture carries over from one period to the next.
    pub fn generate(&self, field: &FieldSpec, seed: u64) -> Vec<SensorReading> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut moisture = MoistureState::default();
        let periods = self.periods as f64;

        let mut readings = Vec::with_capacity(self.periods);
        for i in 0..self.periods {
            let t = i as f64;

            let temp = 22.0
                + 8.0 * (TAU * t / (periods / TEMP_CYCLES)).sin()
                + normal(&mut rng, 0.0, 1.5);
            let humidity = 55.0
                + 15.0 * (TAU * t / (periods / HUMIDITY_CYCLES) + HUMIDITY_PHASE).sin()
                + normal(&mut rng, 0.0, 3.0);
            let rainfall = RAIN_LEVELS_MM[self.rainfall.sample(&mut rng)];
            let wind = normal(&mut rng, 8.0, 2.0).max(0.0);

            let et0 = evapotranspiration(temp, wind);
            let soil = moisture.step(rainfall, et0, normal(&mut rng, 0.0, 0.6));

            readings.push(SensorReading {
                timestamp: self.start + Duration::hours(i as i64),
                field_id: field.field_id.clone(),
                soil_moisture_pct: round2(soil),
                air_temp_c: round2(temp),
                humidity_pct: round2(humidity),
                rainfall_mm: round2(rainfall),
                wind_speed_ms: round2(wind),
                soil_type: field.soil_type.clone(),
                crop_stage: field.crop_stage.clone(),
            });
        }

        readings
    }

    /// Generates every field independently, labels the rows and returns them
    /// sorted by (field_id, timestamp).
    pub fn generate_fields(&self, fields: &[FieldSpec], base_seed: u64) -> Dataset {
        let mut rows = Vec::with_capacity(fields.len() * self.periods);
        for (index, field) in fields.iter().enumerate() {
            let seed = field.effective_seed(base_seed, index);
            tracing::debug!(
                "Generating {} periods for {} (seed {})",
                self.periods,
                field.field_id,
                seed
            );
            rows.extend(label_all(self.generate(field, seed)));
        }
        Dataset::from_rows(rows)
    }
}

fn normal(rng: &mut ChaCha8Rng, mean: f64, std_dev: f64) -> f64 {
    let z: f64 = StandardNormal.sample(rng);
    mean + std_dev * z
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
