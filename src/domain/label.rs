// Irrigation-need label derived from a reading's own soil moisture
use super::reading::{LabeledRow, SensorReading};

/// Moisture level below which a field needs water.
pub const TARGET_MOISTURE_PCT: f64 = 45.0;
pub const LITERS_PER_DEFICIT_POINT: f64 = 2.0;

pub fn moisture_deficit(soil_moisture_pct: f64) -> f64 {
    (TARGET_MOISTURE_PCT - soil_moisture_pct).max(0.0)
}

/// Liters needed over the next 24h. Depends on moisture alone; no look-ahead.
pub fn need_liters_next_24h(soil_moisture_pct: f64) -> f64 {
    moisture_deficit(soil_moisture_pct) * LITERS_PER_DEFICIT_POINT
}

pub fn label(reading: SensorReading) -> LabeledRow {
    let need = need_liters_next_24h(reading.soil_moisture_pct);
    LabeledRow::new(reading, need)
}

pub fn label_all(readings: Vec<SensorReading>) -> Vec<LabeledRow> {
    readings.into_iter().map(label).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_need_liters() {
        assert_eq!(need_liters_next_24h(45.0), 0.0);
        assert_eq!(need_liters_next_24h(80.0), 0.0);
        assert_eq!(need_liters_next_24h(10.0), 70.0);
        assert_eq!(need_liters_next_24h(44.5), 1.0);
    }

    #[test]
    fn test_deficit_is_zero_above_target() {
        assert_eq!(moisture_deficit(60.0), 0.0);
        assert_eq!(moisture_deficit(30.0), 15.0);
    }
}
