//! Command line interface for orbitrace

use clap::Parser;
use std::fmt;
use std::path::PathBuf;

use crate::config::{SimulationConfig, TimeStepMode};
use crate::physics::integrators::registry::IntegratorRegistry;
use crate::plugins::simulation::RunOptions;
use crate::scenario::ScenarioPreset;

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Configuration file could not be loaded
    ConfigLoad(String),
    /// Invalid integrator name provided
    InvalidIntegrator(String),
    /// Overrides produced an unusable configuration
    InvalidOverride(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::ConfigLoad(msg) => write!(f, "Failed to load configuration: {msg}"),
            CliError::InvalidIntegrator(msg) => write!(f, "Invalid integrator: {msg}"),
            CliError::InvalidOverride(msg) => write!(f, "Invalid option: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// orbitrace - N-body gravity trajectories
#[derive(Parser, Debug)]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")"),
    about,
    long_about = None
)]
pub struct Args {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Scenario preset to run (overrides config file)
    #[arg(short = 'S', long, value_name = "NAME")]
    pub scenario: Option<ScenarioPreset>,

    /// Integrator type, e.g. predictor_corrector, symplectic_euler (overrides config file)
    #[arg(short = 'i', long, value_name = "TYPE")]
    pub integrator: Option<String>,

    /// Seconds per step (overrides config file)
    #[arg(short = 't', long, value_name = "SECONDS")]
    pub time_step: Option<f64>,

    /// How the timestep is applied (overrides config file)
    #[arg(long, value_enum, value_name = "MODE")]
    pub step_mode: Option<TimeStepMode>,

    /// Simulated duration in years (overrides config file)
    #[arg(short = 'y', long, value_name = "YEARS")]
    pub years: Option<f64>,

    /// Exact step count, ignoring the scenario duration
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub steps: Option<usize>,

    /// Write trajectories to this CSV file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Save the effective configuration to the user config file
    #[arg(long)]
    pub save_config: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// List available integrators and exit
    #[arg(long)]
    pub list_integrators: bool,

    /// List available scenarios and exit
    #[arg(long)]
    pub list_scenarios: bool,
}

/// Handles the --list-integrators flag by printing available integrators
pub fn handle_list_integrators() {
    let registry = IntegratorRegistry::default();
    println!("Available integrators:");
    for name in registry.list_available() {
        println!("  - {name}");
    }

    let aliases = registry.list_aliases();
    if !aliases.is_empty() {
        println!("\nAliases:");
        for (alias, target) in aliases {
            println!("  - {alias} -> {target}");
        }
    }
}

/// Handles the --list-scenarios flag by printing the presets
pub fn handle_list_scenarios() {
    println!("Available scenarios:");
    for preset in ScenarioPreset::ALL {
        println!(
            "  - {} ({} years): {}",
            preset.name(),
            preset.default_years(),
            preset.description()
        );
    }
}

/// Loads configuration from file or defaults, then applies command-line overrides
pub fn load_and_apply_config(args: &Args) -> Result<SimulationConfig, CliError> {
    let mut config = if let Some(config_path) = &args.config {
        println!("Loading configuration from: {}", config_path.display());
        SimulationConfig::load(config_path).map_err(|err| CliError::ConfigLoad(err.to_string()))?
    } else {
        SimulationConfig::load_from_user_config()
    };

    if let Some(preset) = args.scenario {
        println!("Using scenario: {preset}");
        config.scenario.preset = preset;
    }

    if let Some(integrator_type) = &args.integrator {
        // Validate integrator name against registry
        IntegratorRegistry::default()
            .create(integrator_type)
            .map_err(CliError::InvalidIntegrator)?;

        println!("Using integrator: {integrator_type}");
        config.physics.integrator = integrator_type.clone();
    }

    if let Some(time_step) = args.time_step {
        println!("Overriding time step to: {time_step} s");
        config.physics.time_step = time_step;
    }

    if let Some(mode) = args.step_mode {
        println!("Overriding time step mode to: {mode:?}");
        config.physics.time_step_mode = mode;
    }

    if let Some(years) = args.years {
        println!("Overriding duration to: {years} years");
        config.scenario.years = Some(years);
    }

    config
        .validate()
        .map_err(|err| CliError::InvalidOverride(err.to_string()))?;

    Ok(config)
}

/// Run options that live outside the persisted configuration
pub fn run_options(args: &Args) -> RunOptions {
    RunOptions {
        step_count: args.steps,
        output: args.output.clone(),
    }
}
