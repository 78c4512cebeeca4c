// Soil moisture state carried between consecutive readings of one field

pub const MOISTURE_MIN_PCT: f64 = 10.0;
pub const MOISTURE_MAX_PCT: f64 = 85.0;
pub const INITIAL_MOISTURE_PCT: f64 = 50.0;

/// Fraction of rainfall that ends up in the soil.
const RAIN_INFILTRATION: f64 = 0.6;

/// Evapotranspiration proxy: moisture lost to heat and wind in one period.
pub fn evapotranspiration(air_temp_c: f64, wind_speed_ms: f64) -> f64 {
    (0.08 * air_temp_c + 0.02 * wind_speed_ms - 1.2).max(0.0)
}

/// The generator's only temporal memory. One instance per field; stepped
/// strictly in time order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoistureState {
    pct: f64,
}

impl Default for MoistureState {
    fn default() -> Self {
        Self {
            pct: INITIAL_MOISTURE_PCT,
        }
    }
}

impl MoistureState {
    pub fn new(initial_pct: f64) -> Self {
        Self {
            pct: initial_pct.clamp(MOISTURE_MIN_PCT, MOISTURE_MAX_PCT),
        }
    }

    pub fn pct(&self) -> f64 {
        self.pct
    }

    /// Advances one period and returns the clipped post-update moisture.
    pub fn step(&mut self, rainfall_mm: f64, et0: f64, noise: f64) -> f64 {
        let next = self.pct + RAIN_INFILTRATION * rainfall_mm - et0 + noise;
        self.pct = next.clamp(MOISTURE_MIN_PCT, MOISTURE_MAX_PCT);
        self.pct
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evapotranspiration_never_negative() {
        assert_eq!(evapotranspiration(0.0, 0.0), 0.0);
        assert_eq!(evapotranspiration(-10.0, 3.0), 0.0);
        let et0 = evapotranspiration(25.0, 10.0);
        assert!((et0 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_step_applies_recurrence() {
        let mut state = MoistureState::default();
        let pct = state.step(5.0, 1.0, 0.5);
        assert!((pct - 52.5).abs() < 1e-12);
        assert_eq!(state.pct(), pct);
    }

    #[test]
    fn test_step_clips_to_bounds() {
        let mut state = MoistureState::new(12.0);
        assert_eq!(state.step(0.0, 5.0, -1.0), MOISTURE_MIN_PCT);

        let mut state = MoistureState::new(84.0);
        assert_eq!(state.step(10.0, 0.0, 0.0), MOISTURE_MAX_PCT);
    }

    #[test]
    fn test_initial_value_is_clipped() {
        assert_eq!(MoistureState::new(200.0).pct(), MOISTURE_MAX_PCT);
    }
}
