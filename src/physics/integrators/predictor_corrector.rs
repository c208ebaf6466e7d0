//! Two-evaluation predictor-corrector integration
//!
//! Drifts positions with the acceleration at the start of the step, then
//! corrects velocities with the average of the start and end accelerations.
//! This is the velocity form of Verlet integration, and the default
//! integrator for every simulation.

use super::{Integrator, free_body_accelerations};
use crate::physics::components::Body;
use crate::physics::gravity::AccelerationField;
use crate::physics::math::Scalar;

/// Predictor-corrector (velocity Verlet) integrator
///
/// # Algorithm
///
/// ```text
/// Predictor (drift), every free body, from the pre-step snapshot:
///   a_old = a(x(t))
///   x(t+dt) = x(t) + dt * (v(t) + dt * a_old / 2)
///
/// Corrector (kick), every free body, from the post-drift snapshot:
///   a_new = a(x(t+dt))
///   v(t+dt) = v(t) + dt * (a_new + a_old) / 2
/// ```
///
/// All `a_old` values are gathered before any position moves and all `a_new`
/// values before any velocity moves. Evaluating one body's acceleration after
/// another body has already drifted would make the result depend on storage
/// order.
///
/// # Properties
///
/// - **Order of accuracy**: O(dt²)
/// - **Force evaluations**: 2 per free body per timestep
/// - **Symplectic**: Yes
/// - **Momentum**: conserved exactly in exact arithmetic for closed systems
#[derive(Debug, Copy, Clone, Default)]
pub struct PredictorCorrector;

impl Integrator for PredictorCorrector {
    fn clone_box(&self) -> Box<dyn Integrator> {
        Box::new(*self)
    }

    fn step(&self, bodies: &mut [Body], field: &dyn AccelerationField, dt: Scalar) {
        let old_accelerations = free_body_accelerations(bodies, field);

        for (body, &acceleration) in bodies.iter_mut().zip(&old_accelerations) {
            if body.is_fixed() {
                continue;
            }
            let velocity = body.velocity();
            *body.position_mut() += dt * (velocity + dt * acceleration / 2.0);
        }

        let new_accelerations = free_body_accelerations(bodies, field);

        for ((body, &old), &new) in bodies
            .iter_mut()
            .zip(&old_accelerations)
            .zip(&new_accelerations)
        {
            if body.is_fixed() {
                continue;
            }
            *body.velocity_mut() += dt * (new + old) / 2.0;
        }
    }

    fn convergence_order(&self) -> usize {
        2
    }

    fn force_evaluations(&self) -> usize {
        2
    }

    fn name(&self) -> &'static str {
        "predictor_corrector"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["velocity_verlet", "verlet"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::gravity::{GRAVITATIONAL_CONSTANT, GravityField};
    use crate::physics::integrators::test_fields::{HarmonicField, UniformField};
    use crate::physics::math::Vector;

    const AU: Scalar = 1.5e11;

    fn single(position: Vector, velocity: Vector) -> Vec<Body> {
        vec![Body::free("satellite", position, 1.0, velocity).unwrap()]
    }

    #[test]
    fn test_uniform_field_is_exact() {
        // Constant acceleration is integrated without error
        let mut bodies = single(Vector::ZERO, Vector::new(1.0, 0.0));
        let field = UniformField(Vector::new(0.0, -9.81));
        let dt = 0.5;

        PredictorCorrector.step(&mut bodies, &field, dt);

        let position = bodies[0].position();
        let velocity = bodies[0].velocity();
        assert_eq!(position.x, 0.5);
        assert!((position.y - (-0.5 * 9.81 * dt * dt)).abs() < 1e-12);
        assert_eq!(velocity.x, 1.0);
        assert!((velocity.y - (-9.81 * dt)).abs() < 1e-12);
    }

    #[test]
    fn test_harmonic_single_step_matches_formula() {
        let omega = 2.0;
        let dt = 0.1;
        let mut bodies = single(Vector::new(1.0, 0.0), Vector::new(0.0, 0.5));

        PredictorCorrector.step(&mut bodies, &HarmonicField { omega }, dt);

        let k = omega * omega;
        let a_old = -k * 1.0;
        let x = 1.0 + dt * (0.0 + dt * a_old / 2.0);
        let a_new = -k * x;
        let vx = 0.0 + dt * (a_new + a_old) / 2.0;
        // y starts at rest in position, so only the new acceleration acts
        let y = dt * 0.5;
        let vy = 0.5 + dt * (-k * y) / 2.0;

        assert!((bodies[0].position().x - x).abs() < 1e-15);
        assert!((bodies[0].position().y - y).abs() < 1e-15);
        assert!((bodies[0].velocity().x - vx).abs() < 1e-15);
        assert!((bodies[0].velocity().y - vy).abs() < 1e-15);
    }

    #[test]
    fn test_fixed_bodies_never_move() {
        let mut bodies = vec![
            Body::fixed("star", Vector::new(-3.0 * AU, 0.0), 1.989e30).unwrap(),
            Body::free("planet", Vector::new(0.0, 5.0 * AU), 4.8e24, Vector::new(2e4, 0.0))
                .unwrap(),
        ];
        let field = GravityField::default();

        for _ in 0..100 {
            PredictorCorrector.step(&mut bodies, &field, 3600.0);
        }

        assert_eq!(bodies[0].position(), Vector::new(-3.0 * AU, 0.0));
        assert_eq!(bodies[0].velocity(), Vector::ZERO);
        assert_ne!(bodies[1].position(), Vector::new(0.0, 5.0 * AU));
    }

    #[test]
    fn test_drift_uses_pre_step_snapshot() {
        // Two free bodies: the second one's old acceleration must see the
        // first one where it was before the step.
        let mut bodies = vec![
            Body::free("a", Vector::new(-AU, 0.0), 1e30, Vector::new(0.0, 1e4)).unwrap(),
            Body::free("b", Vector::new(AU, 0.0), 1e30, Vector::new(0.0, -1e4)).unwrap(),
        ];
        let field = GravityField::default();
        let dt = 86_400.0;

        let d = 2.0 * AU;
        let a_old_b = -GRAVITATIONAL_CONSTANT * 1e30 / (d * d);
        let expected_b_x = AU + dt * (dt * a_old_b / 2.0);

        PredictorCorrector.step(&mut bodies, &field, dt);

        let relative = (bodies[1].position().x - expected_b_x).abs() / AU;
        assert!(relative < 1e-14, "relative error {relative}");
    }

    #[test]
    fn test_properties() {
        let integrator = PredictorCorrector;
        assert_eq!(integrator.name(), "predictor_corrector");
        assert_eq!(integrator.convergence_order(), 2);
        assert_eq!(integrator.force_evaluations(), 2);
        assert_eq!(integrator.aliases(), vec!["velocity_verlet", "verlet"]);
    }
}
