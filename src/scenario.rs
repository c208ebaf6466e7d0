//! Named starting configurations
//!
//! Distances are given in multiples of `ScenarioConfig::au`, everything else
//! in SI units.

use crate::config::{PhysicsConfig, ScenarioConfig, TimeStepMode};
use crate::physics::components::{Body, BodyError};
use crate::physics::math::{Scalar, Vector};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const SOLAR_MASS: Scalar = 1.989e30;
pub const SECONDS_PER_YEAR: Scalar = 365.25 * 86_400.0;

/// Largest step count a configuration may ask for
pub const MAX_STEP_COUNT: usize = 100_000_000;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioPreset {
    /// A planet passing over two fixed stars
    BinaryStar,
    /// Two planets on close orbits around a single fixed star
    StarWithPlanets,
}

impl ScenarioPreset {
    pub const ALL: [ScenarioPreset; 2] = [ScenarioPreset::BinaryStar, ScenarioPreset::StarWithPlanets];

    pub fn name(&self) -> &'static str {
        match self {
            ScenarioPreset::BinaryStar => "binary_star",
            ScenarioPreset::StarWithPlanets => "star_with_planets",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ScenarioPreset::BinaryStar => "planet passing over two fixed stars 6 au apart",
            ScenarioPreset::StarWithPlanets => "two planets 0.01 au apart around one fixed star",
        }
    }

    /// How long the preset runs unless overridden
    pub fn default_years(&self) -> Scalar {
        match self {
            ScenarioPreset::BinaryStar => 10.0,
            ScenarioPreset::StarWithPlanets => 2.0,
        }
    }

    pub fn bodies(&self, au: Scalar) -> Result<Vec<Body>, BodyError> {
        match self {
            ScenarioPreset::BinaryStar => Ok(vec![
                Body::fixed("first star", Vector::new(-3.0 * au, 0.0), SOLAR_MASS)?,
                Body::fixed("second star", Vector::new(3.0 * au, 0.0), SOLAR_MASS)?,
                Body::free(
                    "first planet",
                    Vector::new(0.0, 5.0 * au),
                    4.8e24,
                    Vector::new(2e4, 0.0),
                )?,
            ]),
            ScenarioPreset::StarWithPlanets => Ok(vec![
                Body::fixed("first star", Vector::ZERO, SOLAR_MASS)?,
                Body::free(
                    "first planet",
                    Vector::new(0.0, 1.41 * au),
                    4.8e24,
                    Vector::new(1.3e4, 0.0),
                )?,
                Body::free(
                    "second planet",
                    Vector::new(0.0, 1.40 * au),
                    4.8e25,
                    Vector::new(1.3e4, 0.0),
                )?,
            ]),
        }
    }
}

impl fmt::Display for ScenarioPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScenarioPreset {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == name)
            .ok_or_else(|| {
                let available: Vec<&str> = Self::ALL.iter().map(ScenarioPreset::name).collect();
                format!(
                    "Unknown scenario: '{}'. Available scenarios: {}",
                    name,
                    available.join(", ")
                )
            })
    }
}

impl ScenarioConfig {
    pub fn years(&self) -> Scalar {
        self.years.unwrap_or_else(|| self.preset.default_years())
    }

    pub fn bodies(&self) -> Result<Vec<Body>, BodyError> {
        self.preset.bodies(self.au)
    }

    /// Step count passed to `Simulation::run` for the configured duration
    ///
    /// With a fixed timestep this is one more than the number of
    /// `time_step`-second steps the duration needs, since `run` integrates
    /// `step_count - 1` times. In step-index mode it is
    /// `floor(years / step_index_tau)`, the count the reference runs used.
    /// Saturates instead of overflowing; `SimulationConfig::validate` rejects
    /// counts above `MAX_STEP_COUNT`.
    pub fn step_count(&self, physics: &PhysicsConfig) -> usize {
        // Float to int casts saturate
        self.nominal_step_count(physics) as usize
    }

    pub(crate) fn nominal_step_count(&self, physics: &PhysicsConfig) -> Scalar {
        match physics.time_step_mode {
            TimeStepMode::Fixed => {
                (self.years() * SECONDS_PER_YEAR / physics.time_step).ceil() + 1.0
            }
            TimeStepMode::StepIndex => (self.years() / self.step_index_tau).floor(),
        }
    }
}
