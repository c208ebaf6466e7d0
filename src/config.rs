//! Run configuration
//!
//! Layered from defaults, an optional TOML file and `ORBITRACE__*`
//! environment variables (`ORBITRACE__PHYSICS__TIME_STEP=60`).

use crate::physics::gravity::GRAVITATIONAL_CONSTANT;
use crate::physics::integrators::registry::IntegratorRegistry;
use crate::physics::math::Scalar;
use crate::scenario::{MAX_STEP_COUNT, ScenarioPreset};
use crate::simulation::TimeStepPolicy;
use bevy::log::{info, warn};
use bevy::prelude::Resource;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "ORBITRACE";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors raised while loading, validating or saving configuration
#[derive(Debug)]
pub enum ConfigError {
    Load(config::ConfigError),
    Serialize(toml::ser::Error),
    Io(std::io::Error),
    /// No home directory to place a user config in
    NoUserDirectory,
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Load(err) => write!(f, "Failed to load configuration: {err}"),
            ConfigError::Serialize(err) => write!(f, "Failed to serialize configuration: {err}"),
            ConfigError::Io(err) => write!(f, "Failed to write configuration: {err}"),
            ConfigError::NoUserDirectory => {
                write!(f, "Could not determine a user configuration directory")
            }
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Load(err) => Some(err),
            ConfigError::Serialize(err) => Some(err),
            ConfigError::Io(err) => Some(err),
            ConfigError::NoUserDirectory | ConfigError::Invalid(_) => None,
        }
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::Load(err)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialize(err)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

#[derive(Resource, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub physics: PhysicsConfig,
    pub scenario: ScenarioConfig,
}

/// How `PhysicsConfig::time_step` is applied
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum TimeStepMode {
    #[default]
    Fixed,
    /// Legacy: ignore `time_step` and use the step index as the increment
    StepIndex,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravitational_constant: Scalar,
    /// Registry name or alias of the integrator
    pub integrator: String,
    /// Seconds per step
    pub time_step: Scalar,
    pub time_step_mode: TimeStepMode,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            integrator: "predictor_corrector".to_string(),
            time_step: 3600.0,
            time_step_mode: TimeStepMode::Fixed,
        }
    }
}

impl PhysicsConfig {
    pub fn time_step_policy(&self) -> TimeStepPolicy {
        match self.time_step_mode {
            TimeStepMode::Fixed => TimeStepPolicy::Fixed(self.time_step),
            TimeStepMode::StepIndex => TimeStepPolicy::StepIndex,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ScenarioConfig {
    pub preset: ScenarioPreset,
    /// Length scale for preset distances, in meters
    pub au: Scalar,
    /// Simulated duration; the preset's own duration when unset
    pub years: Option<Scalar>,
    /// Nominal step length in years for the step-index timestep mode,
    /// which runs `floor(years / step_index_tau)` steps
    pub step_index_tau: Scalar,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            preset: ScenarioPreset::BinaryStar,
            au: 1.5e11,
            years: None,
            step_index_tau: 1e-4,
        }
    }
}

/// `ORBITRACE__SECTION__KEY` variables, e.g. `ORBITRACE__PHYSICS__TIME_STEP`
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX).separator("__")
}

fn ensure_positive(name: &str, value: Scalar) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{name} must be a positive finite number, got {value}"
        )))
    }
}

impl SimulationConfig {
    /// Load from a TOML file layered over defaults and environment overrides
    ///
    /// The file must exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_layered(path, true, environment())
    }

    /// Load configuration from a file, falling back to defaults if it is missing or broken
    ///
    /// Environment overrides apply whether or not the file exists.
    pub fn load_or_default(path: &str) -> Self {
        Self::load_or_default_from(Path::new(path), environment())
    }

    fn load_or_default_from(path: &Path, environment: config::Environment) -> Self {
        let exists = path.exists();
        if !exists {
            info!(
                "Config file {} not found. Using defaults and environment.",
                path.display()
            );
        }

        match Self::load_layered(path, false, environment) {
            Ok(config) => {
                if exists {
                    info!("Loaded configuration from {}", path.display());
                }
                config
            }
            Err(e) => {
                warn!("{} ({}). Using defaults.", e, path.display());
                Self::default()
            }
        }
    }

    fn load_layered(
        path: &Path,
        required: bool,
        environment: config::Environment,
    ) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(required),
            )
            .add_source(environment)
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Location of the per-user config file, if the platform has one
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "orbitrace")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    pub fn load_from_user_config() -> Self {
        match Self::user_config_path() {
            Some(path) => Self::load_or_default(&path.to_string_lossy()),
            None => {
                warn!("No user configuration directory. Using defaults.");
                Self::default()
            }
        }
    }

    /// Save configuration to a file, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn save_to_user_config(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::user_config_path().ok_or(ConfigError::NoUserDirectory)?;
        self.save(&path)?;
        Ok(path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("physics.gravitational_constant", self.physics.gravitational_constant)?;
        ensure_positive("physics.time_step", self.physics.time_step)?;
        ensure_positive("scenario.au", self.scenario.au)?;
        ensure_positive("scenario.step_index_tau", self.scenario.step_index_tau)?;
        if let Some(years) = self.scenario.years {
            ensure_positive("scenario.years", years)?;
        }

        let steps = self.scenario.nominal_step_count(&self.physics);
        if steps > MAX_STEP_COUNT as Scalar {
            return Err(ConfigError::Invalid(format!(
                "{} years would take {steps:e} steps, more than the limit of {MAX_STEP_COUNT}",
                self.scenario.years()
            )));
        }

        IntegratorRegistry::default()
            .create(&self.physics.integrator)
            .map_err(ConfigError::Invalid)?;

        Ok(())
    }
}
