//! Integration tests for run-to-run and ordering determinism

use orbitrace::physics::components::Body;
use orbitrace::physics::math::{Scalar, Vector};
use orbitrace::simulation::{Simulation, TimeStepPolicy, Trajectories, run_simulation};

const AU: Scalar = 1.5e11;
const SOLAR_MASS: Scalar = 1.989e30;

fn three_free_bodies() -> Vec<Body> {
    vec![
        Body::free("star", Vector::ZERO, SOLAR_MASS, Vector::new(0.0, -10.0)).unwrap(),
        Body::free(
            "inner",
            Vector::new(0.0, 1.41 * AU),
            4.8e24,
            Vector::new(1.3e4, 0.0),
        )
        .unwrap(),
        Body::free(
            "outer",
            Vector::new(-2.0 * AU, 0.5 * AU),
            4.8e25,
            Vector::new(2.0e3, -2.1e4),
        )
        .unwrap(),
    ]
}

fn run(bodies: Vec<Body>) -> Trajectories {
    run_simulation(bodies, 301, TimeStepPolicy::Fixed(3600.0)).unwrap()
}

#[test]
fn test_repeated_runs_are_identical() {
    let first = run(three_free_bodies());
    let second = run(three_free_bodies());

    for trajectory in &first {
        assert_eq!(
            Some(trajectory.points.as_slice()),
            second.get(&trajectory.name),
            "Trajectory of {} differs between runs",
            trajectory.name
        );
    }
}

#[test]
fn test_body_order_does_not_change_result() {
    let forward = run(three_free_bodies());

    let mut reversed_bodies = three_free_bodies();
    reversed_bodies.reverse();
    let reversed = run(reversed_bodies);

    for trajectory in &forward {
        let other = reversed.get(&trajectory.name).unwrap();
        assert_eq!(trajectory.points.len(), other.len());

        for (a, b) in trajectory.points.iter().zip(other) {
            // Only the summation order of the pairwise terms differs
            assert!(
                (*a - *b).length() <= 1e-9 * a.length().max(AU),
                "{} diverged between orderings: {:?} vs {:?}",
                trajectory.name,
                a,
                b
            );
        }
    }
}

#[test]
fn test_trajectory_has_one_point_per_step() {
    let trajectories = run(three_free_bodies());

    assert_eq!(trajectories.len(), 3);
    assert!(trajectories.iter().all(|trajectory| trajectory.points.len() == 300));
}

#[test]
fn test_step_index_policy_is_reproducible() {
    let run_with_index_steps = || {
        let mut simulation = Simulation::new(three_free_bodies()).unwrap();
        simulation.run(20, TimeStepPolicy::StepIndex);
        simulation.into_trajectories()
    };

    let first = run_with_index_steps();
    let second = run_with_index_steps();

    for trajectory in &first {
        assert_eq!(Some(trajectory.points.as_slice()), second.get(&trajectory.name));
    }
}
