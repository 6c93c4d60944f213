//! 6-DOF rigid-body integration.
//!
//! One step consumes the accumulated force and torque:
//! 1. `v += F/m·dt`, then `x += v·dt` (semi-implicit Euler).
//! 2. `α = I⁻¹·τ`, `ω += α·dt`.
//! 3. `q += ½·(0, ω)·q·dt`, then renormalize. Skipping the renormalization
//!    lets the orientation drift off the unit sphere within a few hundred steps.
//! 4. Force and torque are reset to zero; they must be reapplied every tick.

use glam::DVec3;
use log::warn;

use crate::config::IntegrationSettings;
use crate::core::rigidbody::RigidBodyState;

/// Pure transition: returns the body advanced by `dt` with cleared
/// accumulators, leaving `body` untouched.
pub fn step_rigid_body(body: &RigidBodyState, dt: f64) -> RigidBodyState {
    step_rigid_body_with(body, dt, &IntegrationSettings::default())
}

pub fn step_rigid_body_with(
    body: &RigidBodyState,
    dt: f64,
    settings: &IntegrationSettings,
) -> RigidBodyState {
    let mut next = *body;

    let linear_acceleration = body.force / body.mass;
    next.velocity = body.velocity + linear_acceleration * dt;
    next.position = body.position + next.velocity * dt;

    let angular_acceleration = body.inverse_inertia(settings.inertia_frame) * body.torque;
    next.angular_velocity = body.angular_velocity + angular_acceleration * dt;
    next.orientation = body.orientation.integrate(next.angular_velocity, dt);

    next.force = DVec3::ZERO;
    next.torque = DVec3::ZERO;
    next
}

/// In-place counterpart of [`step_rigid_body`].
pub fn integrate_rigid_body(body: &mut RigidBodyState, dt: f64) {
    integrate_rigid_body_with(body, dt, &IntegrationSettings::default());
}

pub fn integrate_rigid_body_with(
    body: &mut RigidBodyState,
    dt: f64,
    settings: &IntegrationSettings,
) {
    let was_finite = body.is_finite();
    *body = step_rigid_body_with(body, dt, settings);
    if was_finite && !body.is_finite() {
        warn!(
            "rigid body at {:?} became non-finite (mass = {})",
            body.position, body.mass
        );
    }
}
