//! Headless simulation plugin
//!
//! Builds the configured scenario at startup, runs it to completion, logs a
//! short report and keeps the trajectories as a resource. Writes them to CSV
//! when an output path is set.

use crate::config::SimulationConfig;
use crate::physics::conserved::{self, ConservedQuantities};
use crate::physics::math::{Scalar, Vector};
use crate::simulation::{Simulation, Trajectories};
use bevy::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

/// Per-invocation options that are not part of the saved configuration
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct RunOptions {
    /// Overrides the step count derived from the scenario duration
    pub step_count: Option<usize>,
    /// CSV destination for the trajectories
    pub output: Option<PathBuf>,
}

/// Trajectories of the finished run
#[derive(Resource, Debug, Clone, Deref)]
pub struct SimulationOutput(pub Trajectories);

pub struct SimulationPlugin {
    config: Option<SimulationConfig>,
    options: RunOptions,
}

impl SimulationPlugin {
    pub fn new() -> Self {
        Self {
            config: None,
            options: RunOptions::default(),
        }
    }

    pub fn with_config(config: SimulationConfig) -> Self {
        Self {
            config: Some(config),
            options: RunOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }
}

impl Default for SimulationPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = self
            .config
            .clone()
            .unwrap_or_else(SimulationConfig::load_from_user_config);

        match toml::to_string_pretty(&config) {
            Ok(toml_string) => {
                debug!("=== Current Configuration (TOML) ===\n{}", toml_string);
                debug!("=== End Configuration ===");
            }
            Err(e) => {
                error!("Failed to serialize configuration to TOML: {}", e);
            }
        }

        app.insert_resource(config);
        app.insert_resource(self.options.clone());
        app.add_systems(Startup, run_configured_simulation);
    }
}

/// Run the configured scenario once and publish the result
pub fn run_configured_simulation(
    mut commands: Commands,
    config: Res<SimulationConfig>,
    options: Res<RunOptions>,
    mut exit: EventWriter<AppExit>,
) {
    match execute(&config, &options) {
        Ok(trajectories) => {
            commands.insert_resource(SimulationOutput(trajectories));
        }
        Err(e) => {
            error!("Simulation failed: {}", e);
            exit.write(AppExit::error());
        }
    }
}

fn execute(
    config: &SimulationConfig,
    options: &RunOptions,
) -> Result<Trajectories, Box<dyn std::error::Error>> {
    let bodies = config.scenario.bodies()?;
    let mut simulation = Simulation::from_config(bodies, &config.physics)?;

    let step_count = options
        .step_count
        .unwrap_or_else(|| config.scenario.step_count(&config.physics));

    info!(
        "Scenario {} with {} bodies, {} steps",
        config.scenario.preset,
        simulation.bodies().len(),
        step_count.saturating_sub(1)
    );

    let initial = ConservedQuantities::measure(simulation.bodies(), simulation.field());
    simulation.advance(step_count, config.physics.time_step_policy());
    let last = ConservedQuantities::measure(simulation.bodies(), simulation.field());
    let barycenter = conserved::barycenter(simulation.bodies());

    let trajectories = simulation.into_trajectories();
    report(&trajectories, &initial, &last, barycenter);

    if let Some(path) = &options.output {
        trajectories.write_csv(BufWriter::new(File::create(path)?))?;
        info!("Wrote trajectories to {}", path.display());
    }

    Ok(trajectories)
}

fn report(
    trajectories: &Trajectories,
    initial: &ConservedQuantities,
    last: &ConservedQuantities,
    barycenter: Option<Vector>,
) {
    for trajectory in trajectories {
        let position = trajectory.last_position();
        info!(
            "{}{}: {} points, last position ({:.6e}, {:.6e}) m",
            trajectory.name,
            if trajectory.fixed { " (fixed)" } else { "" },
            trajectory.points.len(),
            position.x,
            position.y
        );
    }

    match barycenter {
        Some(center) => info!("Barycenter: ({:.6e}, {:.6e}) m", center.x, center.y),
        None => warn!("Barycenter is undefined"),
    }

    // Fixed bodies act as external anchors, so these only mean conservation
    // for all-free systems
    info!(
        "Momentum change: ({:.3e}, {:.3e}) kg m/s",
        last.momentum.x - initial.momentum.x,
        last.momentum.y - initial.momentum.y
    );
    info!(
        "Relative energy change: {}, relative angular momentum change: {}",
        format_drift(last.energy_drift(initial)),
        format_drift(last.angular_momentum_drift(initial))
    );
}

fn format_drift(drift: Option<Scalar>) -> String {
    drift.map_or_else(|| "undefined".to_string(), |value| format!("{value:.3e}"))
}
