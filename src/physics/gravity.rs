//! Direct pairwise Newtonian gravity

use crate::physics::components::Body;
use crate::physics::math::{self, Scalar, Vector};

/// Newtonian gravitational constant in m³ kg⁻¹ s⁻²
pub const GRAVITATIONAL_CONSTANT: Scalar = 6.67408e-11;

/// Source of per-body accelerations for the integrators
///
/// Every call reads positions from the slice it is given, so an integrator
/// that evaluates all bodies against one slice before writing anything back
/// gets a consistent snapshot.
pub trait AccelerationField: Send + Sync {
    /// Net acceleration on `bodies[target]` due to every other body
    fn acceleration_on(&self, target: usize, bodies: &[Body]) -> Vector;

    /// Accelerations for every body, all read from the same slice
    fn accelerations(&self, bodies: &[Body]) -> Vec<Vector> {
        (0..bodies.len())
            .map(|target| self.acceleration_on(target, bodies))
            .collect()
    }
}

/// Exact O(n²) gravity with no softening
///
/// Coincident bodies divide zero by zero. The resulting NaN is returned as is
/// and flows into the affected bodies' state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityField {
    gravitational_constant: Scalar,
}

impl GravityField {
    pub fn new(gravitational_constant: Scalar) -> Self {
        Self {
            gravitational_constant,
        }
    }

    #[inline]
    pub fn gravitational_constant(&self) -> Scalar {
        self.gravitational_constant
    }

    /// Acceleration at an arbitrary point, skipping the body at `exclude`
    pub fn acceleration_at(
        &self,
        position: Vector,
        exclude: Option<usize>,
        bodies: &[Body],
    ) -> Vector {
        bodies
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != exclude)
            .fold(Vector::ZERO, |acceleration, (_, other)| {
                let offset = other.position() - position;
                let distance = math::length(offset);
                let distance_cubed = distance * distance * distance;

                acceleration + offset * (self.gravitational_constant * other.mass() / distance_cubed)
            })
    }

    /// Gravitational potential energy of the whole system (each pair once)
    pub fn potential_energy(&self, bodies: &[Body]) -> Scalar {
        let mut energy = 0.0;
        for (i, a) in bodies.iter().enumerate() {
            for b in &bodies[i + 1..] {
                let distance = math::length(b.position() - a.position());
                energy -= self.gravitational_constant * a.mass() * b.mass() / distance;
            }
        }
        energy
    }
}

impl Default for GravityField {
    fn default() -> Self {
        Self::new(GRAVITATIONAL_CONSTANT)
    }
}

impl AccelerationField for GravityField {
    fn acceleration_on(&self, target: usize, bodies: &[Body]) -> Vector {
        self.acceleration_at(bodies[target].position(), Some(target), bodies)
    }
}
