//! Quantities that a closed system should conserve
//!
//! Used to measure integrator drift over a run. Fixed bodies are anchored by
//! an external constraint, so momentum and energy are only conserved when
//! every body is free.

use crate::physics::components::Body;
use crate::physics::gravity::GravityField;
use crate::physics::math::{self, Scalar, Vector};

pub fn total_mass(bodies: &[Body]) -> Scalar {
    bodies.iter().map(Body::mass).sum()
}

pub fn total_momentum(bodies: &[Body]) -> Vector {
    bodies
        .iter()
        .fold(Vector::ZERO, |momentum, body| momentum + body.momentum())
}

pub fn kinetic_energy(bodies: &[Body]) -> Scalar {
    bodies.iter().map(Body::kinetic_energy).sum()
}

/// Kinetic plus gravitational potential energy
pub fn total_energy(bodies: &[Body], field: &GravityField) -> Scalar {
    kinetic_energy(bodies) + field.potential_energy(bodies)
}

/// Total angular momentum about the origin (z component)
pub fn angular_momentum(bodies: &[Body]) -> Scalar {
    bodies
        .iter()
        .map(|body| body.mass() * math::cross(body.position(), body.velocity()))
        .sum()
}

/// Mass-weighted mean position, `None` for an empty or massless set
pub fn barycenter(bodies: &[Body]) -> Option<Vector> {
    let mass = total_mass(bodies);
    if mass <= Scalar::EPSILON {
        return None;
    }

    let weighted = bodies
        .iter()
        .fold(Vector::ZERO, |sum, body| sum + body.position() * body.mass());
    let barycenter = weighted / mass;

    barycenter.is_finite().then_some(barycenter)
}

/// Snapshot of the conserved quantities, compared before and after a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConservedQuantities {
    pub momentum: Vector,
    pub energy: Scalar,
    pub angular_momentum: Scalar,
}

impl ConservedQuantities {
    pub fn measure(bodies: &[Body], field: &GravityField) -> Self {
        Self {
            momentum: total_momentum(bodies),
            energy: total_energy(bodies, field),
            angular_momentum: angular_momentum(bodies),
        }
    }

    /// Relative energy change since `initial`
    ///
    /// `None` when the initial energy is zero or not finite.
    pub fn energy_drift(&self, initial: &Self) -> Option<Scalar> {
        relative_change(initial.energy, self.energy)
    }

    /// Relative angular momentum change since `initial`, `None` as above
    pub fn angular_momentum_drift(&self, initial: &Self) -> Option<Scalar> {
        relative_change(initial.angular_momentum, self.angular_momentum)
    }
}

fn relative_change(initial: Scalar, current: Scalar) -> Option<Scalar> {
    if !initial.is_finite() || initial.abs() <= Scalar::MIN_POSITIVE {
        return None;
    }

    let change = (current - initial).abs() / initial.abs();
    change.is_finite().then_some(change)
}
