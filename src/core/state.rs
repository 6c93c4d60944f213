use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Kinematic state of a point mass.
///
/// Integrators treat this as a value: every step returns a fresh state and the
/// input is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsState {
    pub position: DVec3,
    pub velocity: DVec3,
    /// Acceleration used by the step that produced this state.
    pub acceleration: DVec3,
    /// Must be positive; not checked.
    pub mass: f64,
    pub time: f64,
}

impl Default for PhysicsState {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            velocity: DVec3::ZERO,
            acceleration: DVec3::ZERO,
            mass: 1.0,
            time: 0.0,
        }
    }
}

impl PhysicsState {
    pub fn new(position: DVec3, velocity: DVec3, mass: f64) -> Self {
        Self {
            position,
            velocity,
            mass,
            ..Self::default()
        }
    }

    pub fn with_time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    pub fn momentum(&self) -> DVec3 {
        self.velocity * self.mass
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.velocity.is_finite()
            && self.acceleration.is_finite()
            && self.time.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_starts_at_rest_in_time() {
        let state = PhysicsState::new(DVec3::X, DVec3::new(0.0, 2.0, 0.0), 3.0);
        assert_eq!(state.time, 0.0);
        assert_eq!(state.acceleration, DVec3::ZERO);
        assert_eq!(state.kinetic_energy(), 6.0);
        assert_eq!(state.momentum(), DVec3::new(0.0, 6.0, 0.0));
    }

    #[test]
    fn non_finite_velocity_is_reported() {
        let mut state = PhysicsState::default();
        assert!(state.is_finite());
        state.velocity.x = f64::NAN;
        assert!(!state.is_finite());
    }
}
