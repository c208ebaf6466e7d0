pub mod simulation;

pub use simulation::{RunOptions, SimulationOutput, SimulationPlugin};
