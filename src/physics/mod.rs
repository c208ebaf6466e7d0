//! Physics core: bodies, gravity and integrators

pub mod components;
pub mod conserved;
pub mod gravity;
pub mod integrators;
pub mod math;
