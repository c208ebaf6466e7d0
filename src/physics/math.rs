//! Numeric types shared by the physics modules

/// Scalar type for physics calculations (f64 for precision)
pub type Scalar = f64;

/// 2D vector type for positions, velocities, and accelerations
pub type Vector = bevy::math::DVec2;

/// Euclidean length computed through `libm` so results match across targets
#[inline]
pub fn length(vector: Vector) -> Scalar {
    libm::sqrt(vector.x * vector.x + vector.y * vector.y)
}

/// 2D cross product (z component of the 3D cross product)
#[inline]
pub fn cross(a: Vector, b: Vector) -> Scalar {
    a.x * b.y - a.y * b.x
}
