//! Global configuration constants and tunable settings for the simulation core.

use serde::{Deserialize, Serialize};

use crate::error::PhysicsError;

/// Guard used for every division and normalization in the core.
pub const EPSILON: f64 = 1e-10;

/// Default integration timestep (in seconds).
pub const DEFAULT_TIME_STEP: f64 = 1.0 / 60.0;

/// Above this quaternion dot product `slerp` falls back to normalized lerp.
pub const SLERP_DOT_THRESHOLD: f64 = 0.9995;

/// Fraction of the penetration removed per collision by positional correction.
pub const BAUMGARTE_PERCENT: f64 = 0.2;

/// Penetration depth tolerated before positional correction kicks in.
pub const PENETRATION_SLOP: f64 = 0.01;

/// Newtonian constant of gravitation (m³ kg⁻¹ s⁻²).
pub const GRAVITATIONAL_CONSTANT: f64 = 6.674_30e-11;

/// Default restitution for bodies built through `create_rigid_body`.
pub const DEFAULT_RESTITUTION: f64 = 0.5;

/// Default friction for bodies built through `create_rigid_body`.
pub const DEFAULT_FRICTION: f64 = 0.5;

/// Asteroids are rough and absorb most of an impact.
pub const ASTEROID_RESTITUTION: f64 = 0.3;
pub const ASTEROID_FRICTION: f64 = 0.8;

/// Default frame budget used by the world profiler (milliseconds).
pub const DEFAULT_FRAME_BUDGET_MS: f64 = 4.0;

/// Frame in which a body's inertia tensor is applied during integration and
/// collision response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InertiaFrame {
    /// The diagonal body tensor is used as-is. Exact only while the body's
    /// principal axes line up with the world axes, or for spherically
    /// symmetric tensors.
    #[default]
    Body,
    /// The tensor is rotated into world space (`R·I⁻¹·Rᵗ`) before use.
    World,
}

/// Settings consumed by rigid-body integration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IntegrationSettings {
    pub inertia_frame: InertiaFrame,
}

/// Settings consumed by impulse-based collision resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSettings {
    /// Baumgarte factor, see [`BAUMGARTE_PERCENT`].
    pub correction_percent: f64,
    /// Penetration allowance, see [`PENETRATION_SLOP`].
    pub penetration_slop: f64,
    pub inertia_frame: InertiaFrame,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            correction_percent: BAUMGARTE_PERCENT,
            penetration_slop: PENETRATION_SLOP,
            inertia_frame: InertiaFrame::Body,
        }
    }
}

/// Configuration for a [`crate::world::PhysicsWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub time_step: f64,
    pub substeps: u32,
    /// Integrate bodies through rayon. Ignored without the `parallel` feature.
    pub parallel: bool,
    pub frame_budget_ms: f64,
    pub integration: IntegrationSettings,
    pub contact: ContactSettings,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            time_step: DEFAULT_TIME_STEP,
            substeps: 1,
            parallel: false,
            frame_budget_ms: DEFAULT_FRAME_BUDGET_MS,
            integration: IntegrationSettings::default(),
            contact: ContactSettings::default(),
        }
    }
}

impl WorldConfig {
    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_substeps(mut self, substeps: u32) -> Self {
        self.substeps = substeps;
        self
    }

    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    pub fn with_inertia_frame(mut self, frame: InertiaFrame) -> Self {
        self.integration.inertia_frame = frame;
        self.contact.inertia_frame = frame;
        self
    }

    /// Rejects settings the stepping loop cannot work with.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(PhysicsError::InvalidConfig(format!(
                "time step must be positive and finite, got {}",
                self.time_step
            )));
        }
        if self.substeps == 0 {
            return Err(PhysicsError::InvalidConfig(
                "substeps must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.contact.correction_percent) {
            return Err(PhysicsError::InvalidConfig(format!(
                "correction percent must lie in [0, 1], got {}",
                self.contact.correction_percent
            )));
        }
        if self.contact.penetration_slop < 0.0 {
            return Err(PhysicsError::InvalidConfig(format!(
                "penetration slop must be non-negative, got {}",
                self.contact.penetration_slop
            )));
        }
        Ok(())
    }
}
