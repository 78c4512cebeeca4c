use crate::domain::dataset::DEFAULT_TRAIN_FRACTION;
use crate::domain::field::FieldSpec;
use chrono::{Duration, NaiveDateTime, SubsecRound, Utc};
use serde::Deserialize;
use std::path::PathBuf;

const CONFIG_FILE: &str = "config/irrigation";
const ENV_PREFIX: &str = "IRRIGATION";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub paths: PathSettings,
    pub generation: GenerationSettings,
    pub training: TrainingSettings,
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PathSettings {
    pub dataset: PathBuf,
    pub model: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("data/raw/simulated.csv"),
            model: PathBuf::from("models/baseline.json"),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GenerationSettings {
    pub periods: usize,
    pub seed: u64,
    /// Used when `start` is not set: the series ends roughly now.
    pub lookback_days: i64,
    pub start: Option<NaiveDateTime>,
    pub fields: Vec<FieldSpec>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            periods: 60 * 24,
            seed: 42,
            lookback_days: 60,
            start: None,
            fields: FieldSpec::defaults(),
        }
    }
}

impl GenerationSettings {
    pub fn start_time(&self) -> NaiveDateTime {
        self.start.unwrap_or_else(|| {
            (Utc::now() - Duration::days(self.lookback_days))
                .naive_utc()
                .trunc_subsecs(0)
        })
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TrainingSettings {
    pub train_fraction: f64,
}

impl Default for TrainingSettings {
    fn default() -> Self {
        Self {
            train_fraction: DEFAULT_TRAIN_FRACTION,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Defaults, then `config/irrigation.{toml,...}` if present, then
/// `IRRIGATION__SECTION__KEY` environment variables.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(CONFIG_FILE).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
