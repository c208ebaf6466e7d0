//! orbitrace prelude module
//!
//! Re-exports the types most callers need to build bodies and run a
//! simulation.

pub use crate::config::{PhysicsConfig, ScenarioConfig, SimulationConfig, TimeStepMode};
pub use crate::physics::components::{Body, BodyError, BodyHandle};
pub use crate::physics::conserved::ConservedQuantities;
pub use crate::physics::gravity::{AccelerationField, GRAVITATIONAL_CONSTANT, GravityField};
pub use crate::physics::integrators::registry::IntegratorRegistry;
pub use crate::physics::integrators::{Integrator, PredictorCorrector};
pub use crate::physics::math::{Scalar, Vector};
pub use crate::scenario::ScenarioPreset;
pub use crate::simulation::{
    Simulation, SimulationError, TimeStepPolicy, Trajectories, Trajectory, run_simulation,
};
