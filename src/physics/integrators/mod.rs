//! Numerical integration methods for n-body simulation
//!
//! Integrators advance every body of a system at once. Each one reads all
//! accelerations for a pass from a single snapshot of positions before it
//! writes any position back, so the outcome does not depend on the order the
//! bodies are stored in.

use crate::physics::components::Body;
use crate::physics::gravity::AccelerationField;
use crate::physics::math::{Scalar, Vector};

pub mod explicit_euler;
pub mod predictor_corrector;
pub mod registry;
pub mod symplectic_euler;

pub use explicit_euler::ExplicitEuler;
pub use predictor_corrector::PredictorCorrector;
pub use symplectic_euler::SymplecticEuler;

/// Base trait for all integrators
pub trait Integrator: Send + Sync {
    /// Clone this integrator into a new box
    fn clone_box(&self) -> Box<dyn Integrator>;

    /// Advance every free body by one timestep
    ///
    /// Fixed bodies are left untouched but still take part in every
    /// acceleration evaluation.
    fn step(&self, bodies: &mut [Body], field: &dyn AccelerationField, dt: Scalar);

    /// Order of the local truncation error
    fn convergence_order(&self) -> usize;

    /// Acceleration evaluations per free body per step
    fn force_evaluations(&self) -> usize;

    /// Canonical name used by the registry and in configuration files
    fn name(&self) -> &'static str;

    /// Alternative names accepted by the registry
    fn aliases(&self) -> Vec<&'static str> {
        Vec::new()
    }
}

impl Clone for Box<dyn Integrator> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Accelerations for the free bodies only, read from one snapshot
///
/// Fixed bodies get `Vector::ZERO` since nothing consumes their value.
pub(crate) fn free_body_accelerations(
    bodies: &[Body],
    field: &dyn AccelerationField,
) -> Vec<Vector> {
    bodies
        .iter()
        .enumerate()
        .map(|(index, body)| {
            if body.is_fixed() {
                Vector::ZERO
            } else {
                field.acceleration_on(index, bodies)
            }
        })
        .collect()
}
