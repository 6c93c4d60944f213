//! Point-mass integrators.
//!
//! Every integrator is a pure transition: it reads a [`PhysicsState`], returns
//! the next one, and advances `time` by exactly `dt`. Which algorithm runs is
//! chosen per call, so callers can switch freely between Euler and RK4. Verlet
//! is the exception in practice because it needs the previous position, which
//! is not part of `PhysicsState`; [`Trajectory`] keeps that history for you.

use std::collections::VecDeque;

use glam::DVec3;
use log::warn;
use serde::{Deserialize, Serialize};

use super::forces::ForceFunction;
use crate::config::EPSILON;
use crate::core::state::PhysicsState;

/// Integration algorithm selected for a single step.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Integrator {
    /// Velocity first, then position from the new velocity. Bounded energy
    /// error, the stable default for oscillatory and orbital motion.
    #[default]
    SemiImplicitEuler,
    /// Position Verlet. Needs the position from the previous step.
    Verlet { previous_position: DVec3 },
    /// Classic fourth-order Runge-Kutta. Four force evaluations per step.
    Rk4,
}

impl Integrator {
    pub fn step<F>(&self, state: &PhysicsState, force: &F, dt: f64) -> PhysicsState
    where
        F: ForceFunction + ?Sized,
    {
        match *self {
            Integrator::SemiImplicitEuler => euler_step(state, force, dt),
            Integrator::Verlet { previous_position } => {
                verlet_step(state, previous_position, force, dt)
            }
            Integrator::Rk4 => rk4_step(state, force, dt),
        }
    }

    pub fn method(&self) -> IntegrationMethod {
        match self {
            Integrator::SemiImplicitEuler => IntegrationMethod::SemiImplicitEuler,
            Integrator::Verlet { .. } => IntegrationMethod::Verlet,
            Integrator::Rk4 => IntegrationMethod::Rk4,
        }
    }
}

/// Algorithm choice without per-step data, used by [`Trajectory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IntegrationMethod {
    #[default]
    SemiImplicitEuler,
    Verlet,
    Rk4,
}

/// Semi-implicit (symplectic) Euler step.
pub fn euler_step<F>(state: &PhysicsState, force: &F, dt: f64) -> PhysicsState
where
    F: ForceFunction + ?Sized,
{
    let acceleration = force.force(state) / state.mass;
    let velocity = state.velocity + acceleration * dt;
    let position = state.position + velocity * dt;

    PhysicsState {
        position,
        velocity,
        acceleration,
        mass: state.mass,
        time: state.time + dt,
    }
}

/// Position Verlet step: `x' = 2x − x_prev + a·dt²`.
///
/// The returned velocity is the central difference `(x' − x_prev) / 2dt`. It is
/// only reported; the next step never reads it. With `|dt|` below [`EPSILON`]
/// the incoming velocity is reported unchanged.
pub fn verlet_step<F>(
    state: &PhysicsState,
    previous_position: DVec3,
    force: &F,
    dt: f64,
) -> PhysicsState
where
    F: ForceFunction + ?Sized,
{
    let acceleration = force.force(state) / state.mass;
    let position = 2.0 * state.position - previous_position + acceleration * dt * dt;
    let velocity = if dt.abs() < EPSILON {
        state.velocity
    } else {
        (position - previous_position) / (2.0 * dt)
    };

    PhysicsState {
        position,
        velocity,
        acceleration,
        mass: state.mass,
        time: state.time + dt,
    }
}

/// Fourth-order Runge-Kutta step over `(position, velocity)`.
///
/// The reported acceleration is the 1:2:2:1 weighted mean of the four slope
/// samples.
pub fn rk4_step<F>(state: &PhysicsState, force: &F, dt: f64) -> PhysicsState
where
    F: ForceFunction + ?Sized,
{
    let acceleration_at = |position: DVec3, velocity: DVec3, time: f64| {
        let probe = PhysicsState {
            position,
            velocity,
            time,
            ..*state
        };
        force.force(&probe) / state.mass
    };

    let half_dt = 0.5 * dt;
    let (x, v, t) = (state.position, state.velocity, state.time);

    let k1_x = v;
    let k1_v = acceleration_at(x, v, t);

    let k2_x = v + k1_v * half_dt;
    let k2_v = acceleration_at(x + k1_x * half_dt, v + k1_v * half_dt, t + half_dt);

    let k3_x = v + k2_v * half_dt;
    let k3_v = acceleration_at(x + k2_x * half_dt, v + k2_v * half_dt, t + half_dt);

    let k4_x = v + k3_v * dt;
    let k4_v = acceleration_at(x + k3_x * dt, v + k3_v * dt, t + dt);

    let dx = (k1_x + 2.0 * k2_x + 2.0 * k3_x + k4_x) / 6.0;
    let dv = (k1_v + 2.0 * k2_v + 2.0 * k3_v + k4_v) / 6.0;

    PhysicsState {
        position: x + dx * dt,
        velocity: v + dv * dt,
        acceleration: dv,
        mass: state.mass,
        time: t + dt,
    }
}

/// A point mass advanced step by step, carrying the position history Verlet
/// needs and an optional bounded trail of past positions.
#[derive(Debug, Clone)]
pub struct Trajectory {
    state: PhysicsState,
    previous_position: Option<DVec3>,
    method: IntegrationMethod,
    trail: VecDeque<DVec3>,
    trail_capacity: usize,
    reported_non_finite: bool,
}

impl Trajectory {
    pub fn new(state: PhysicsState, method: IntegrationMethod) -> Self {
        Self {
            state,
            previous_position: None,
            method,
            trail: VecDeque::new(),
            trail_capacity: 0,
            reported_non_finite: false,
        }
    }

    /// Keeps the last `capacity` positions for plotting.
    pub fn with_trail(mut self, capacity: usize) -> Self {
        self.trail_capacity = capacity;
        self.trail = VecDeque::with_capacity(capacity);
        self
    }

    pub fn state(&self) -> &PhysicsState {
        &self.state
    }

    pub fn method(&self) -> IntegrationMethod {
        self.method
    }

    pub fn set_method(&mut self, method: IntegrationMethod) {
        self.method = method;
    }

    pub fn previous_position(&self) -> Option<DVec3> {
        self.previous_position
    }

    pub fn trail(&self) -> impl Iterator<Item = &DVec3> + '_ {
        self.trail.iter()
    }

    /// Advances one step and returns the new state.
    ///
    /// The first Verlet step without history assumes `x_prev = x − v·dt`.
    pub fn advance<F>(&mut self, force: &F, dt: f64) -> &PhysicsState
    where
        F: ForceFunction + ?Sized,
    {
        let integrator = match self.method {
            IntegrationMethod::SemiImplicitEuler => Integrator::SemiImplicitEuler,
            IntegrationMethod::Rk4 => Integrator::Rk4,
            IntegrationMethod::Verlet => Integrator::Verlet {
                previous_position: self
                    .previous_position
                    .unwrap_or(self.state.position - self.state.velocity * dt),
            },
        };

        let next = integrator.step(&self.state, force, dt);
        self.previous_position = Some(self.state.position);
        self.state = next;

        if self.trail_capacity > 0 {
            if self.trail.len() == self.trail_capacity {
                self.trail.pop_front();
            }
            self.trail.push_back(next.position);
        }

        if !self.reported_non_finite && !next.is_finite() {
            warn!(
                "point-mass state became non-finite at t = {} (mass = {})",
                next.time, next.mass
            );
            self.reported_non_finite = true;
        }

        &self.state
    }

    /// Runs `steps` steps of size `dt`.
    pub fn run<F>(&mut self, force: &F, dt: f64, steps: usize) -> &PhysicsState
    where
        F: ForceFunction + ?Sized,
    {
        for _ in 0..steps {
            self.advance(force, dt);
        }
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::forces::{ConstantForce, SpringForce};
    use approx::assert_relative_eq;

    fn falling() -> (PhysicsState, ConstantForce) {
        let state = PhysicsState::new(DVec3::new(0.0, 10.0, 0.0), DVec3::new(1.0, 0.0, 0.0), 2.0);
        let weight = ConstantForce {
            force: DVec3::new(0.0, -19.62, 0.0),
        };
        (state, weight)
    }

    #[test]
    fn verlet_with_zero_step_keeps_reported_velocity() {
        let (state, weight) = falling();
        let next = verlet_step(&state, state.position, &weight, 0.0);
        assert!(next.is_finite());
        assert_eq!(next.velocity, state.velocity);
        assert_eq!(next.position, state.position);
    }

    #[test]
    fn euler_updates_velocity_before_position() {
        let (state, weight) = falling();
        let next = euler_step(&state, &weight, 0.1);

        assert_relative_eq!(next.velocity.y, -0.981, epsilon = 1e-12);
        // Position uses the already updated velocity.
        assert_relative_eq!(next.position.y, 10.0 - 0.0981, epsilon = 1e-12);
        assert_relative_eq!(next.position.x, 0.1, epsilon = 1e-12);
        assert_relative_eq!(next.acceleration.y, -9.81, epsilon = 1e-12);
        assert_relative_eq!(next.time, 0.1, epsilon = 1e-15);
    }

    #[test]
    fn integrators_leave_input_untouched() {
        let (state, weight) = falling();
        let copy = state;
        for integrator in [
            Integrator::SemiImplicitEuler,
            Integrator::Rk4,
            Integrator::Verlet {
                previous_position: state.position,
            },
        ] {
            let next = integrator.step(&state, &weight, 0.5);
            assert_eq!(state, copy);
            assert_relative_eq!(next.time, state.time + 0.5, epsilon = 1e-15);
        }
    }

    #[test]
    fn verlet_uses_previous_position() {
        let (state, weight) = falling();
        let previous = state.position - DVec3::new(0.1, 0.0, 0.0);
        let next = verlet_step(&state, previous, &weight, 0.1);

        let expected_y = 2.0 * 10.0 - 10.0 - 9.81 * 0.01;
        assert_relative_eq!(next.position.y, expected_y, epsilon = 1e-12);
        assert_relative_eq!(next.position.x, 0.1, epsilon = 1e-12);
        assert_relative_eq!(next.velocity.x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn rk4_is_exact_for_constant_force() {
        let (state, weight) = falling();
        let dt = 0.25;
        let mut current = state;
        for _ in 0..8 {
            current = rk4_step(&current, &weight, dt);
        }
        let t = 2.0;
        assert_relative_eq!(current.position.y, 10.0 - 0.5 * 9.81 * t * t, epsilon = 1e-9);
        assert_relative_eq!(current.velocity.y, -9.81 * t, epsilon = 1e-9);
        assert_relative_eq!(current.acceleration.y, -9.81, epsilon = 1e-12);
    }

    #[test]
    fn trajectory_bootstraps_verlet_and_bounds_trail() {
        let spring = SpringForce::new(DVec3::ZERO, 1.0);
        let start = PhysicsState::new(DVec3::X, DVec3::ZERO, 1.0);
        let mut trajectory = Trajectory::new(start, IntegrationMethod::Verlet).with_trail(4);

        assert!(trajectory.previous_position().is_none());
        trajectory.run(&spring, 0.01, 10);

        assert_eq!(trajectory.trail().count(), 4);
        assert_relative_eq!(trajectory.state().time, 0.1, epsilon = 1e-12);
        assert!(trajectory.previous_position().is_some());
        // Still near the turning point of a unit-amplitude oscillation.
        assert!(trajectory.state().position.x < 1.0);
        assert!(trajectory.state().position.x > 0.99);
    }

    #[test]
    fn trajectory_can_switch_methods_mid_run() {
        let spring = SpringForce::new(DVec3::ZERO, 4.0);
        let start = PhysicsState::new(DVec3::X, DVec3::ZERO, 1.0);
        let mut trajectory = Trajectory::new(start, IntegrationMethod::SemiImplicitEuler);
        trajectory.run(&spring, 0.001, 100);
        trajectory.set_method(IntegrationMethod::Verlet);
        trajectory.run(&spring, 0.001, 100);
        trajectory.set_method(IntegrationMethod::Rk4);
        trajectory.run(&spring, 0.001, 100);

        // Analytic: x(t) = cos(2t) at t = 0.3.
        let expected = (2.0_f64 * 0.3).cos();
        assert!((trajectory.state().position.x - expected).abs() < 5e-3);
        assert_eq!(trajectory.method(), IntegrationMethod::Rk4);
    }
}
