//! Symplectic Euler integration method
//!
//! The simplest symplectic integrator. First order, but its energy error stays
//! bounded instead of drifting, which makes it a useful baseline next to the
//! predictor-corrector.

use super::{Integrator, free_body_accelerations};
use crate::physics::components::Body;
use crate::physics::gravity::AccelerationField;
use crate::physics::math::Scalar;

/// Symplectic Euler integrator (also known as semi-implicit Euler)
///
/// # Algorithm
///
/// ```text
/// Stage 1: Velocity update using current positions
///   a(t) = a(x(t))
///   v(t+dt) = v(t) + a(t) * dt
///
/// Stage 2: Position update using NEW velocity
///   x(t+dt) = x(t) + v(t+dt) * dt
/// ```
///
/// Updating velocity first is what makes the map symplectic. The reverse
/// order is explicit Euler.
///
/// # Mathematical Properties
///
/// - **Order of accuracy**: O(dt)
/// - **Symplectic**: Yes
/// - **Force evaluations**: 1 per timestep
#[derive(Debug, Copy, Clone, Default)]
pub struct SymplecticEuler;

impl Integrator for SymplecticEuler {
    fn clone_box(&self) -> Box<dyn Integrator> {
        Box::new(*self)
    }

    fn step(&self, bodies: &mut [Body], field: &dyn AccelerationField, dt: Scalar) {
        let accelerations = free_body_accelerations(bodies, field);

        for (body, &acceleration) in bodies.iter_mut().zip(&accelerations) {
            if body.is_fixed() {
                continue;
            }

            // Update velocity first: v(t+dt) = v(t) + a(t) * dt
            *body.velocity_mut() += acceleration * dt;

            // Then update position using new velocity: x(t+dt) = x(t) + v(t+dt) * dt
            let velocity = body.velocity();
            *body.position_mut() += velocity * dt;
        }
    }

    fn convergence_order(&self) -> usize {
        1
    }

    fn force_evaluations(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "symplectic_euler"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["euler", "semi_implicit_euler"]
    }
}
