use glam::DVec3;

use crate::config::{EPSILON, GRAVITATIONAL_CONSTANT};
use crate::core::state::PhysicsState;
use crate::math::vector::VectorExt;

/// Pure mapping from a point-mass state to the net force acting on it.
///
/// Implementations must not depend on anything but the state they are given:
/// multi-stage integrators evaluate the same force at several trial states.
pub trait ForceFunction: Send + Sync {
    fn force(&self, state: &PhysicsState) -> DVec3;
}

impl<F> ForceFunction for F
where
    F: Fn(&PhysicsState) -> DVec3 + Send + Sync,
{
    fn force(&self, state: &PhysicsState) -> DVec3 {
        self(state)
    }
}

/// Inverse-square attraction toward a fixed center.
#[derive(Debug, Clone, Copy)]
pub struct GravityForce {
    pub center: DVec3,
    /// `G·M` of the attracting body.
    pub gravitational_parameter: f64,
}

impl GravityForce {
    pub fn new(center: DVec3, gravitational_parameter: f64) -> Self {
        Self {
            center,
            gravitational_parameter,
        }
    }

    /// Builds the field of a body of `central_mass` kilograms using SI `G`.
    pub fn from_central_mass(center: DVec3, central_mass: f64) -> Self {
        Self::new(center, GRAVITATIONAL_CONSTANT * central_mass)
    }
}

impl ForceFunction for GravityForce {
    fn force(&self, state: &PhysicsState) -> DVec3 {
        let offset = self.center - state.position;
        let distance = offset.length();
        if distance < EPSILON {
            return DVec3::ZERO;
        }
        let magnitude = self.gravitational_parameter * state.mass / (distance * distance);
        offset / distance * magnitude
    }
}

/// Quadratic drag resisting the direction of motion.
#[derive(Debug, Clone, Copy)]
pub struct DragForce {
    pub coefficient: f64,
}

impl ForceFunction for DragForce {
    fn force(&self, state: &PhysicsState) -> DVec3 {
        let speed = state.velocity.length();
        if speed < EPSILON {
            return DVec3::ZERO;
        }
        -state.velocity.safe_normalize() * speed * speed * self.coefficient
    }
}

/// Hookean spring tying the mass to a fixed anchor.
#[derive(Debug, Clone, Copy)]
pub struct SpringForce {
    pub anchor: DVec3,
    pub stiffness: f64,
    pub rest_length: f64,
}

impl SpringForce {
    /// Spring with zero rest length: `F = −k·(x − anchor)`.
    pub fn new(anchor: DVec3, stiffness: f64) -> Self {
        Self {
            anchor,
            stiffness,
            rest_length: 0.0,
        }
    }

    pub fn with_rest_length(mut self, rest_length: f64) -> Self {
        self.rest_length = rest_length;
        self
    }
}

impl ForceFunction for SpringForce {
    fn force(&self, state: &PhysicsState) -> DVec3 {
        let displacement = state.position - self.anchor;
        if self.rest_length == 0.0 {
            return -self.stiffness * displacement;
        }
        let distance = displacement.length();
        if distance < EPSILON {
            return DVec3::ZERO;
        }
        let extension = distance - self.rest_length;
        -self.stiffness * extension * (displacement / distance)
    }
}

/// Linear damping `−c·v`.
#[derive(Debug, Clone, Copy)]
pub struct DampingForce {
    pub coefficient: f64,
}

impl ForceFunction for DampingForce {
    fn force(&self, state: &PhysicsState) -> DVec3 {
        -self.coefficient * state.velocity
    }
}

/// Force that ignores the state entirely.
#[derive(Debug, Clone, Copy)]
pub struct ConstantForce {
    pub force: DVec3,
}

impl ForceFunction for ConstantForce {
    fn force(&self, _state: &PhysicsState) -> DVec3 {
        self.force
    }
}

/// Sum of several forces, each evaluated against the same state.
#[derive(Default)]
pub struct CombinedForce {
    forces: Vec<Box<dyn ForceFunction>>,
}

impl CombinedForce {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<F: ForceFunction + 'static>(mut self, force: F) -> Self {
        self.add_force(force);
        self
    }

    pub fn add_force<F: ForceFunction + 'static>(&mut self, force: F) {
        self.forces.push(Box::new(force));
    }

    pub fn len(&self) -> usize {
        self.forces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forces.is_empty()
    }
}

impl ForceFunction for CombinedForce {
    fn force(&self, state: &PhysicsState) -> DVec3 {
        self.forces
            .iter()
            .fold(DVec3::ZERO, |total, force| total + force.force(state))
    }
}

/// Combines already boxed forces into one.
pub fn combine(forces: Vec<Box<dyn ForceFunction>>) -> CombinedForce {
    CombinedForce { forces }
}
