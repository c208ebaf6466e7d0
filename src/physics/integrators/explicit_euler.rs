//! Explicit (forward) Euler integration method

use super::{Integrator, free_body_accelerations};
use crate::physics::components::Body;
use crate::physics::gravity::AccelerationField;
use crate::physics::math::Scalar;

/// Explicit Euler integrator
///
/// Moves positions with the old velocity and velocities with the old
/// acceleration. First order and not symplectic: orbits spiral outward as
/// energy grows every step. Kept as the worst-case reference when comparing
/// integrators.
///
/// ```text
/// x(t+dt) = x(t) + v(t) * dt
/// v(t+dt) = v(t) + a(x(t)) * dt
/// ```
#[derive(Debug, Copy, Clone, Default)]
pub struct ExplicitEuler;

impl Integrator for ExplicitEuler {
    fn clone_box(&self) -> Box<dyn Integrator> {
        Box::new(*self)
    }

    fn step(&self, bodies: &mut [Body], field: &dyn AccelerationField, dt: Scalar) {
        let accelerations = free_body_accelerations(bodies, field);

        for (body, &acceleration) in bodies.iter_mut().zip(&accelerations) {
            if body.is_fixed() {
                continue;
            }
            let velocity = body.velocity();
            *body.position_mut() += velocity * dt;
            *body.velocity_mut() += acceleration * dt;
        }
    }

    fn convergence_order(&self) -> usize {
        1
    }

    fn force_evaluations(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "explicit_euler"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["forward_euler"]
    }
}
