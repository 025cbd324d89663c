//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `smartenergy.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::path::PathBuf;

use serde::Deserialize;

use smartenergy_app::classifier::ForestParams;
use smartenergy_domain::actuator::ActuatorMap;
use smartenergy_domain::control::{OverrideMode, Overrides};
use smartenergy_domain::energy::EnergyProfile;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Durable decision log settings.
    pub storage: StorageConfig,
    /// Wattages and tariff.
    pub energy: EnergyConfig,
    /// Corpus and forest settings.
    pub training: TrainingConfig,
    /// Simulated sensors and cycle loop.
    pub simulation: SimulationConfig,
    /// Initial operator overrides.
    pub overrides: OverridesConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Durable decision log configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the CSV log file.
    pub log_path: PathBuf,
    /// Column delimiter; must be a single ASCII character.
    pub delimiter: char,
}

/// Energy accounting configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EnergyConfig {
    /// Always-on household load, in watts.
    pub baseline_watts: f64,
    /// Price of one kWh.
    pub tariff_per_kwh: f64,
    /// Draw of each actuator while on, in watts.
    pub rated_watts: RatedWattsConfig,
}

/// Rated wattage per actuator.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RatedWattsConfig {
    pub climate: f64,
    pub entertainment: f64,
    pub lighting: f64,
}

/// Classifier training configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of synthetic examples.
    pub corpus_size: usize,
    pub n_estimators: usize,
    pub max_depth: usize,
    pub min_samples_split: usize,
    /// Share of the corpus held out for the accuracy report.
    pub test_fraction: f64,
    /// Seed for the corpus, the split and the forests.
    pub seed: u64,
}

/// Simulated sensors and periodic cycle configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seconds between two decision cycles.
    pub interval_secs: u64,
    /// Sensor seed; unset means seeded from the operating system.
    pub seed: Option<u64>,
    /// Probability that a sensor sample fails.
    pub failure_rate: f64,
}

/// Initial override per actuator.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OverridesConfig {
    pub climate: OverrideMode,
    pub entertainment: OverrideMode,
    pub lighting: OverrideMode,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `smartenergy.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("smartenergy.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("SMARTENERGY_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("SMARTENERGY_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("SMARTENERGY_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("SMARTENERGY_LOG_PATH") {
            self.storage.log_path = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("SMARTENERGY_BASELINE_WATTS") {
            if let Ok(watts) = val.parse() {
                self.energy.baseline_watts = watts;
            }
        }
        if let Ok(val) = std::env::var("SMARTENERGY_TARIFF") {
            if let Ok(tariff) = val.parse() {
                self.energy.tariff_per_kwh = tariff;
            }
        }
        if let Ok(val) = std::env::var("SMARTENERGY_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        let delimiter = self.storage.delimiter;
        if !delimiter.is_ascii() {
            return Err(ConfigError::Validation(
                "delimiter must be a single ASCII character".to_string(),
            ));
        }
        if matches!(delimiter, '"' | '\n' | '\r') {
            return Err(ConfigError::Validation(format!(
                "delimiter {delimiter:?} clashes with CSV quoting or line endings"
            )));
        }
        let energy = &self.energy;
        let watts = [
            energy.baseline_watts,
            energy.tariff_per_kwh,
            energy.rated_watts.climate,
            energy.rated_watts.entertainment,
            energy.rated_watts.lighting,
        ];
        if watts.iter().any(|value| !value.is_finite()) {
            return Err(ConfigError::Validation(
                "energy values must be finite".to_string(),
            ));
        }
        if self.training.corpus_size == 0 || self.training.n_estimators == 0 {
            return Err(ConfigError::Validation(
                "corpus_size and n_estimators must be non-zero".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.training.test_fraction) {
            return Err(ConfigError::Validation(
                "test_fraction must be within 0.0..1.0".to_string(),
            ));
        }
        if self.simulation.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "interval_secs must be non-zero".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.simulation.failure_rate) {
            return Err(ConfigError::Validation(
                "failure_rate must be within 0.0..=1.0".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Delimiter as the byte the CSV writer expects.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn delimiter(&self) -> u8 {
        // Validated as ASCII.
        self.storage.delimiter as u8
    }

    /// Wattages and tariff as a domain profile.
    #[must_use]
    pub fn energy_profile(&self) -> EnergyProfile {
        let rated = &self.energy.rated_watts;
        EnergyProfile {
            rated_watts: ActuatorMap {
                climate: rated.climate,
                entertainment: rated.entertainment,
                lighting: rated.lighting,
            },
            baseline_watts: self.energy.baseline_watts,
            tariff_per_kwh: self.energy.tariff_per_kwh,
        }
    }

    /// Forest hyper-parameters.
    #[must_use]
    pub fn forest_params(&self) -> ForestParams {
        ForestParams {
            n_estimators: self.training.n_estimators,
            max_depth: self.training.max_depth,
            min_samples_split: self.training.min_samples_split,
            max_features: None,
            seed: self.training.seed,
        }
    }

    /// Initial overrides.
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            climate: self.overrides.climate,
            entertainment: self.overrides.entertainment,
            lighting: self.overrides.lighting,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("log_energi.csv"),
            delimiter: ',',
        }
    }
}

impl Default for EnergyConfig {
    fn default() -> Self {
        let profile = EnergyProfile::default();
        Self {
            baseline_watts: profile.baseline_watts,
            tariff_per_kwh: profile.tariff_per_kwh,
            rated_watts: RatedWattsConfig::default(),
        }
    }
}

impl Default for RatedWattsConfig {
    fn default() -> Self {
        let rated = EnergyProfile::default().rated_watts;
        Self {
            climate: rated.climate,
            entertainment: rated.entertainment,
            lighting: rated.lighting,
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        let forest = ForestParams::default();
        Self {
            corpus_size: 1_000,
            n_estimators: forest.n_estimators,
            max_depth: forest.max_depth,
            min_samples_split: forest.min_samples_split,
            test_fraction: 0.2,
            seed: forest.seed,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            interval_secs: 40,
            seed: None,
            failure_rate: 0.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "smartenergyd=info,smartenergy=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
