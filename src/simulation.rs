//! Simulation driver
//!
//! Owns the body set, advances it one integrator step at a time and records
//! every body's position after each step.

use crate::physics::components::{Body, BodyError, BodyHandle};
use crate::physics::gravity::GravityField;
use crate::physics::integrators::registry::IntegratorRegistry;
use crate::physics::integrators::{Integrator, PredictorCorrector};
use crate::physics::math::{Scalar, Vector};
use crate::config::PhysicsConfig;
use bevy::log::{info, trace, warn};
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::io::{self, Write};

/// Errors raised while setting up a simulation
#[derive(Debug)]
pub enum SimulationError {
    /// Two bodies share a name
    DuplicateBody(String),
    /// Integrator name was not found in the registry
    UnknownIntegrator(String),
    /// A body failed validation
    Body(BodyError),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::DuplicateBody(name) => {
                write!(f, "Duplicate body name: '{name}'")
            }
            SimulationError::UnknownIntegrator(msg) => write!(f, "{msg}"),
            SimulationError::Body(err) => write!(f, "Invalid body: {err}"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Body(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BodyError> for SimulationError {
    fn from(err: BodyError) -> Self {
        SimulationError::Body(err)
    }
}

/// How the timestep for each step is chosen
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeStepPolicy {
    /// The same increment, in seconds, for every step
    Fixed(Scalar),
    /// Step `k` (1-based) integrates with `dt = k` seconds
    ///
    /// Reproduces the reference runs, whose driver passed the step index where
    /// a timestep was expected. The increment grows without bound, so this is
    /// only useful for comparing against those runs.
    StepIndex,
}

impl TimeStepPolicy {
    /// Timestep for the given 1-based step index
    #[inline]
    pub fn dt_for(&self, step_index: usize) -> Scalar {
        match self {
            TimeStepPolicy::Fixed(dt) => *dt,
            TimeStepPolicy::StepIndex => step_index as Scalar,
        }
    }
}

/// Recorded positions for one body
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub name: String,
    pub fixed: bool,
    pub initial_position: Vector,
    pub points: Vec<Vector>,
}

impl Trajectory {
    /// Where the body ended up, or started if no step was taken
    pub fn last_position(&self) -> Vector {
        self.points.last().copied().unwrap_or(self.initial_position)
    }
}

/// Per-body trajectories in body order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectories {
    entries: Vec<Trajectory>,
}

impl Trajectories {
    pub fn get(&self, name: &str) -> Option<&[Vector]> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.points.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trajectory> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write every recorded point as `body,step,x,y`, steps counted from 1
    ///
    /// Names containing a comma, quote or line break are quoted.
    pub fn write_csv<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "body,step,x,y")?;
        for entry in &self.entries {
            let name = csv_field(&entry.name);
            for (index, point) in entry.points.iter().enumerate() {
                writeln!(writer, "{},{},{},{}", name, index + 1, point.x, point.y)?;
            }
        }
        writer.flush()
    }
}

fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

impl<'a> IntoIterator for &'a Trajectories {
    type Item = &'a Trajectory;
    type IntoIter = std::slice::Iter<'a, Trajectory>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A set of bodies under mutual gravity
pub struct Simulation {
    bodies: Vec<Body>,
    integrator: Box<dyn Integrator>,
    field: GravityField,
    steps_taken: usize,
    elapsed_time: Scalar,
    /// Bodies already reported as non-finite, by index
    diverged: Vec<bool>,
}

impl Simulation {
    pub fn new(bodies: Vec<Body>) -> Result<Self, SimulationError> {
        let mut seen = HashSet::with_capacity(bodies.len());
        for body in &bodies {
            if !seen.insert(body.name()) {
                return Err(SimulationError::DuplicateBody(body.name().to_string()));
            }
        }

        let diverged = vec![false; bodies.len()];
        Ok(Self {
            bodies,
            integrator: Box::new(PredictorCorrector),
            field: GravityField::default(),
            steps_taken: 0,
            elapsed_time: 0.0,
            diverged,
        })
    }

    /// Build with the integrator and gravitational constant named in `config`
    pub fn from_config(bodies: Vec<Body>, config: &PhysicsConfig) -> Result<Self, SimulationError> {
        let integrator = IntegratorRegistry::default()
            .create(&config.integrator)
            .map_err(SimulationError::UnknownIntegrator)?;

        Ok(Self::new(bodies)?
            .with_integrator(integrator)
            .with_field(GravityField::new(config.gravitational_constant)))
    }

    pub fn with_integrator(mut self, integrator: Box<dyn Integrator>) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn with_field(mut self, field: GravityField) -> Self {
        self.field = field;
        self
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle.index())
    }

    pub fn handle_of(&self, name: &str) -> Option<BodyHandle> {
        self.bodies
            .iter()
            .position(|body| body.name() == name)
            .map(BodyHandle)
    }

    pub fn field(&self) -> &GravityField {
        &self.field
    }

    pub fn integrator_name(&self) -> &'static str {
        self.integrator.name()
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    pub fn elapsed_time(&self) -> Scalar {
        self.elapsed_time
    }

    /// Advance one step of `dt` seconds and record every body's position
    pub fn step(&mut self, dt: Scalar) {
        self.integrator.step(&mut self.bodies, &self.field, dt);

        for body in &mut self.bodies {
            body.record_position();
        }

        self.steps_taken += 1;
        self.elapsed_time += dt;
        trace!("Step {} done, t = {} s", self.steps_taken, self.elapsed_time);

        self.report_divergence();
    }

    /// Run `step_count - 1` steps and return a copy of the trajectories
    pub fn run(&mut self, step_count: usize, policy: TimeStepPolicy) -> Trajectories {
        self.advance(step_count, policy);
        self.trajectories()
    }

    /// Run `step_count - 1` steps, indexed from 1
    ///
    /// With no bodies, or a step count below 2, nothing is integrated.
    pub fn advance(&mut self, step_count: usize, policy: TimeStepPolicy) {
        if self.bodies.is_empty() {
            return;
        }

        info!(
            "Running {} steps of {} bodies with {} ({:?})",
            step_count.saturating_sub(1),
            self.bodies.len(),
            self.integrator.name(),
            policy
        );

        for step_index in 1..step_count {
            self.step(policy.dt_for(step_index));
        }

        info!(
            "Finished after {} steps, t = {} s",
            self.steps_taken, self.elapsed_time
        );
    }

    /// Trajectories recorded so far
    pub fn trajectories(&self) -> Trajectories {
        Trajectories {
            entries: self
                .bodies
                .iter()
                .map(|body| Trajectory {
                    name: body.name().to_string(),
                    fixed: body.is_fixed(),
                    initial_position: body.initial_position(),
                    points: body.trajectory().to_vec(),
                })
                .collect(),
        }
    }

    /// Consume the simulation, moving the trajectories out without copying
    pub fn into_trajectories(mut self) -> Trajectories {
        Trajectories {
            entries: self
                .bodies
                .iter_mut()
                .map(|body| Trajectory {
                    name: body.name().to_string(),
                    fixed: body.is_fixed(),
                    initial_position: body.initial_position(),
                    points: body.take_trajectory(),
                })
                .collect(),
        }
    }

    fn report_divergence(&mut self) {
        for (body, diverged) in self.bodies.iter().zip(self.diverged.iter_mut()) {
            if !*diverged && !body.is_finite() {
                *diverged = true;
                warn!(
                    "Body '{}' has a non-finite state after step {}",
                    body.name(),
                    self.steps_taken
                );
            }
        }
    }
}

/// Build a simulation with the default integrator and run it
pub fn run_simulation(
    bodies: Vec<Body>,
    step_count: usize,
    policy: TimeStepPolicy,
) -> Result<Trajectories, SimulationError> {
    let mut simulation = Simulation::new(bodies)?;
    simulation.advance(step_count, policy);
    Ok(simulation.into_trajectories())
}
