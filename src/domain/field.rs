// Field domain model
use serde::Deserialize;

/// A physical plot with its own independent sensor series.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldSpec {
    pub field_id: String,
    pub soil_type: String,
    pub crop_stage: String,
    /// Overrides the generation seed derived from the base seed.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl FieldSpec {
    pub fn new(field_id: &str, soil_type: &str, crop_stage: &str) -> Self {
        Self {
            field_id: field_id.to_string(),
            soil_type: soil_type.to_string(),
            crop_stage: crop_stage.to_string(),
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Seed for this field: its own, or `base_seed + index`.
    pub fn effective_seed(&self, base_seed: u64, index: usize) -> u64 {
        self.seed
            .unwrap_or_else(|| base_seed.wrapping_add(index as u64))
    }

    /// The two demo fields the simulator ships with.
    pub fn defaults() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("field_1", "loam", "vegetative"),
            FieldSpec::new("field_2", "sandy", "flowering"),
        ]
    }
}
