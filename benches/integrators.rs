//! Integrator benchmarks
//!
//! - Step throughput against direct-summation gravity for growing body counts
//! - Accuracy after one period of a harmonic oscillator, reported as a
//!   duration scaled by 1e9 so Criterion can plot it. Lower is better.

use criterion::{BenchmarkId, Criterion, PlotConfiguration, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use orbitrace::physics::components::Body;
use orbitrace::physics::gravity::{AccelerationField, GravityField};
use orbitrace::physics::integrators::Integrator;
use orbitrace::physics::integrators::registry::IntegratorRegistry;
use orbitrace::physics::math::{Scalar, Vector};

const PI: Scalar = std::f64::consts::PI;
const AU: Scalar = 1.5e11;

struct HarmonicOscillator {
    k: Scalar,
}

impl AccelerationField for HarmonicOscillator {
    fn acceleration_on(&self, target: usize, bodies: &[Body]) -> Vector {
        -self.k * bodies[target].position()
    }
}

fn get_integrators() -> Vec<(String, Box<dyn Integrator>)> {
    let registry = IntegratorRegistry::new().with_standard_integrators();
    registry
        .list_available()
        .into_iter()
        .filter_map(|name| registry.create(&name).ok().map(|integrator| (name, integrator)))
        .collect()
}

/// One central star with the rest on a deterministic ring around it
fn ring_system(count: usize) -> Vec<Body> {
    let mut bodies = Vec::with_capacity(count);
    bodies.push(Body::free("star", Vector::ZERO, 1.989e30, Vector::ZERO).unwrap());

    for i in 1..count {
        let angle = (i as Scalar) * 2.0 * PI / (count as Scalar);
        let radius = AU * (1.0 + (i as Scalar) * 0.01);
        let speed = 3.0e4 / (radius / AU).sqrt();

        bodies.push(
            Body::free(
                format!("planet {i}"),
                Vector::new(radius * angle.cos(), radius * angle.sin()),
                6.0e24,
                Vector::new(-speed * angle.sin(), speed * angle.cos()),
            )
            .unwrap(),
        );
    }

    bodies
}

fn bench_step_throughput(c: &mut Criterion) {
    let field = GravityField::default();

    for (name, integrator) in &get_integrators() {
        let mut group = c.benchmark_group(format!("step/{name}"));

        for &body_count in &[2, 3, 10, 50, 100, 500] {
            group.throughput(Throughput::Elements(body_count as u64));
            group.bench_with_input(
                BenchmarkId::from_parameter(body_count),
                &body_count,
                |b, &count| {
                    let mut bodies = ring_system(count);
                    b.iter(|| {
                        integrator.step(black_box(&mut bodies), &field, black_box(3600.0));
                    });
                },
            );
        }

        group.finish();
    }
}

fn bench_integrator_accuracy(c: &mut Criterion) {
    let mut group = c.benchmark_group("integrator_accuracy");
    group
        .plot_config(PlotConfiguration::default().summary_scale(criterion::AxisScale::Logarithmic));

    let omega = 2.0 * PI;
    let oscillator = HarmonicOscillator { k: omega * omega };

    for (name, integrator) in &get_integrators() {
        group.bench_function(BenchmarkId::new("harmonic", name.as_str()), |b| {
            b.iter_custom(|iters| {
                let mut total_error = 0.0;

                for _ in 0..iters {
                    let mut bodies =
                        vec![Body::free("oscillator", Vector::X, 1.0, Vector::ZERO).unwrap()];
                    let dt = 0.01;
                    // One period
                    let steps = 100;

                    for _ in 0..steps {
                        integrator.step(&mut bodies, &oscillator, dt);
                    }

                    let t = dt * steps as Scalar;
                    let exact = Vector::new((omega * t).cos(), 0.0);
                    total_error += (bodies[0].position() - exact).length();
                }

                let avg_error = total_error / iters as f64;
                std::time::Duration::from_nanos((avg_error * 1e9) as u64)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_step_throughput, bench_integrator_accuracy);
criterion_main!(benches);
