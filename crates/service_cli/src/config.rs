//! Run configuration management.
//!
//! Handles loading of `riskq` configuration from TOML files with
//! environment variable override support. Command line flags are applied
//! on top by the individual commands.

use std::path::{Path, PathBuf};

use quant_core::RiskResult;
use quant_simulation::{
    CapPolicy, SimulationConfig, DEFAULT_CAP, DEFAULT_SEED, MAX_PERIODS, MAX_SCENARIOS,
};
use serde::Deserialize;
use thiserror::Error;

/// Register quantification run configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    /// Risk register CSV path
    pub register_path: PathBuf,

    /// Root under which timestamped output directories are created
    pub output_root: PathBuf,

    /// Number of Monte Carlo scenarios
    pub scenarios: usize,

    /// Number of periods up to the horizon
    pub periods: usize,

    /// Base seed
    pub seed: u64,

    /// Multiply severities by the materialization mask
    pub independent_sampling: bool,

    /// Cap each stochastic factor's impact
    pub cap_enabled: bool,

    /// Cap value
    pub cap_value: f64,

    /// Write per-factor and aggregate artefacts
    pub save_interim_files: bool,

    /// Log level
    pub log_level: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            register_path: PathBuf::from("data/risk_register.csv"),
            output_root: PathBuf::from("outputs"),
            scenarios: 10_000,
            periods: 5,
            seed: DEFAULT_SEED,
            independent_sampling: true,
            cap_enabled: true,
            cap_value: DEFAULT_CAP,
            save_interim_files: true,
            log_level: "info".to_string(),
        }
    }
}

impl RunConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path`, or the defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    ///
    /// Unparseable numeric or boolean values are ignored.
    pub fn with_env_override(mut self) -> Self {
        if let Ok(path) = std::env::var("RISKQ_REGISTER") {
            self.register_path = PathBuf::from(path);
        }

        if let Ok(root) = std::env::var("RISKQ_OUTPUT_ROOT") {
            self.output_root = PathBuf::from(root);
        }

        if let Some(scenarios) = env_parse("RISKQ_SCENARIOS") {
            self.scenarios = scenarios;
        }

        if let Some(periods) = env_parse("RISKQ_PERIODS") {
            self.periods = periods;
        }

        if let Some(seed) = env_parse("RISKQ_SEED") {
            self.seed = seed;
        }

        if let Some(independent) = env_parse("RISKQ_INDEPENDENT_SAMPLING") {
            self.independent_sampling = independent;
        }

        if let Some(enabled) = env_parse("RISKQ_CAP_ENABLED") {
            self.cap_enabled = enabled;
        }

        if let Some(cap) = env_parse("RISKQ_CAP_VALUE") {
            self.cap_value = cap;
        }

        if let Some(save) = env_parse("RISKQ_SAVE_INTERIM_FILES") {
            self.save_interim_files = save;
        }

        if let Ok(log_level) = std::env::var("RISKQ_LOG_LEVEL") {
            self.log_level = log_level;
        }

        self
    }

    /// Validate the configuration, reporting every problem at once
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, valid_log_levels
            ));
        }

        if self.scenarios == 0 || self.scenarios > MAX_SCENARIOS {
            errors.push(format!(
                "scenarios must be in [1, {}], got {}",
                MAX_SCENARIOS, self.scenarios
            ));
        }

        if self.periods == 0 || self.periods > MAX_PERIODS {
            errors.push(format!(
                "periods must be in [1, {}], got {}",
                MAX_PERIODS, self.periods
            ));
        }

        if self.cap_enabled && !self.cap_value.is_finite() {
            errors.push(format!("cap_value must be finite, got {}", self.cap_value));
        }

        if self.register_path.as_os_str().is_empty() {
            errors.push("register_path cannot be empty".to_string());
        }

        if self.save_interim_files && self.output_root.as_os_str().is_empty() {
            errors.push("output_root cannot be empty when saving interim files".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Cap policy implied by `cap_enabled` / `cap_value`
    pub fn cap_policy(&self) -> CapPolicy {
        if self.cap_enabled {
            CapPolicy::Enabled(self.cap_value)
        } else {
            CapPolicy::Disabled
        }
    }

    /// Build the simulation configuration
    pub fn simulation_config(&self) -> RiskResult<SimulationConfig> {
        SimulationConfig::builder()
            .n_scenarios(self.scenarios)
            .n_periods(self.periods)
            .seed(self.seed)
            .independent_sampling(self.independent_sampling)
            .cap(self.cap_policy())
            .build()
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|value| value.trim().parse().ok())
}

/// Configuration error type
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
