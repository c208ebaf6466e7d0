//! Per-body simulation state

use crate::physics::math::{Scalar, Vector};
use std::fmt;

/// Errors raised while constructing a body
#[derive(Debug, Clone, PartialEq)]
pub enum BodyError {
    /// Mass was zero, negative or NaN
    NonPositiveMass { name: String, mass: Scalar },
    /// Position or velocity had a NaN or infinite component
    NonFiniteState { name: String },
    /// Bodies are keyed by name, so it cannot be blank
    EmptyName,
}

impl fmt::Display for BodyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyError::NonPositiveMass { name, mass } => {
                write!(f, "Body '{name}' must have a positive mass, got {mass}")
            }
            BodyError::NonFiniteState { name } => {
                write!(f, "Body '{name}' has a non-finite position or velocity")
            }
            BodyError::EmptyName => write!(f, "Body name must not be empty"),
        }
    }
}

impl std::error::Error for BodyError {}

/// Stable index of a body inside a simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub usize);

impl BodyHandle {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A point mass and the positions it has visited
///
/// Mass, the fixed flag and the initial position never change after
/// construction. Fixed bodies still attract every other body, but no
/// integrator moves them.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    name: String,
    position: Vector,
    initial_position: Vector,
    velocity: Vector,
    mass: Scalar,
    fixed: bool,
    trajectory: Vec<Vector>,
}

impl Body {
    pub fn new(
        name: impl Into<String>,
        position: Vector,
        mass: Scalar,
        velocity: Vector,
        fixed: bool,
    ) -> Result<Self, BodyError> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(BodyError::EmptyName);
        }

        if !mass.is_finite() || mass <= 0.0 {
            return Err(BodyError::NonPositiveMass { name, mass });
        }

        if !position.is_finite() || !velocity.is_finite() {
            return Err(BodyError::NonFiniteState { name });
        }

        Ok(Self {
            name,
            position,
            initial_position: position,
            velocity,
            mass,
            fixed,
            trajectory: Vec::new(),
        })
    }

    /// A body the integrators are free to move
    pub fn free(
        name: impl Into<String>,
        position: Vector,
        mass: Scalar,
        velocity: Vector,
    ) -> Result<Self, BodyError> {
        Self::new(name, position, mass, velocity, false)
    }

    /// A body pinned in place, at rest
    pub fn fixed(name: impl Into<String>, position: Vector, mass: Scalar) -> Result<Self, BodyError> {
        Self::new(name, position, mass, Vector::ZERO, true)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn position(&self) -> Vector {
        self.position
    }

    #[inline]
    pub fn position_mut(&mut self) -> &mut Vector {
        &mut self.position
    }

    #[inline]
    pub fn initial_position(&self) -> Vector {
        self.initial_position
    }

    #[inline]
    pub fn velocity(&self) -> Vector {
        self.velocity
    }

    #[inline]
    pub fn velocity_mut(&mut self) -> &mut Vector {
        &mut self.velocity
    }

    #[inline]
    pub fn mass(&self) -> Scalar {
        self.mass
    }

    #[inline]
    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    #[inline]
    pub fn trajectory(&self) -> &[Vector] {
        &self.trajectory
    }

    /// Whether the current position and velocity are both finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }

    /// Append the current position to the trajectory
    pub fn record_position(&mut self) {
        self.trajectory.push(self.position);
    }

    pub fn take_trajectory(&mut self) -> Vec<Vector> {
        std::mem::take(&mut self.trajectory)
    }

    pub fn momentum(&self) -> Vector {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> Scalar {
        0.5 * self.mass * self.velocity.length_squared()
    }
}
