//! orbitrace library
//!
//! Direct-summation Newtonian gravity for a handful of bodies, advanced with
//! a predictor-corrector integrator at a fixed timestep. Each body's visited
//! positions are recorded for plotting elsewhere.

pub mod cli;
pub mod config;
pub mod physics;
pub mod plugins;
pub mod prelude;
pub mod scenario;
pub mod simulation;
