use glam::DVec3;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::config::{ContactSettings, EPSILON};
use crate::core::rigidbody::RigidBodyState;

/// Result of a narrow-phase test between two bodies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionInfo {
    /// World-space contact point.
    pub point: DVec3,
    /// Unit normal pointing from the first body toward the second.
    pub normal: DVec3,
    /// Overlap depth along the normal.
    pub penetration: f64,
}

/// Impulse-based response with default [`ContactSettings`].
pub fn resolve_collision(
    body_a: &mut RigidBodyState,
    body_b: &mut RigidBodyState,
    collision: &CollisionInfo,
) -> bool {
    resolve_collision_with(body_a, body_b, collision, &ContactSettings::default())
}

/// Applies a single normal impulse plus partial positional correction.
///
/// Returns `false` without touching either body when they are already
/// separating along the normal, or when the effective mass is degenerate.
/// Velocities are never clamped.
pub fn resolve_collision_with(
    body_a: &mut RigidBodyState,
    body_b: &mut RigidBodyState,
    collision: &CollisionInfo,
    settings: &ContactSettings,
) -> bool {
    let normal = collision.normal;
    let point = collision.point;

    let r_a = point - body_a.position;
    let r_b = point - body_b.position;

    let relative_velocity = body_b.velocity_at_point(point) - body_a.velocity_at_point(point);
    let velocity_along_normal = relative_velocity.dot(normal);

    if velocity_along_normal > 0.0 {
        trace!("bodies already separating ({velocity_along_normal:.4} m/s), skipping");
        return false;
    }

    let restitution = body_a.restitution.min(body_b.restitution);

    let inverse_mass_a = body_a.inverse_mass();
    let inverse_mass_b = body_b.inverse_mass();
    let inverse_inertia_a = body_a.inverse_inertia(settings.inertia_frame);
    let inverse_inertia_b = body_b.inverse_inertia(settings.inertia_frame);

    let angular_a = (inverse_inertia_a * r_a.cross(normal)).cross(r_a).dot(normal);
    let angular_b = (inverse_inertia_b * r_b.cross(normal)).cross(r_b).dot(normal);
    let effective_mass = inverse_mass_a + inverse_mass_b + angular_a + angular_b;

    if effective_mass.abs() < EPSILON {
        trace!("degenerate effective mass, skipping contact");
        return false;
    }

    let impulse_magnitude = -(1.0 + restitution) * velocity_along_normal / effective_mass;
    let impulse = normal * impulse_magnitude;

    body_a.velocity -= impulse * inverse_mass_a;
    body_b.velocity += impulse * inverse_mass_b;
    body_a.angular_velocity -= inverse_inertia_a * r_a.cross(impulse);
    body_b.angular_velocity += inverse_inertia_b * r_b.cross(impulse);

    let total_inverse_mass = inverse_mass_a + inverse_mass_b;
    if total_inverse_mass > EPSILON {
        let depth = (collision.penetration - settings.penetration_slop).max(0.0);
        let correction = normal * (depth / total_inverse_mass * settings.correction_percent);
        body_a.position -= correction * inverse_mass_a;
        body_b.position += correction * inverse_mass_b;
    }

    trace!(
        "resolved contact: impulse {impulse_magnitude:.4}, restitution {restitution:.2}, depth {:.4}",
        collision.penetration
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::sphere::detect_sphere_sphere_collision;
    use crate::core::rigidbody::create_asteroid;
    use approx::assert_relative_eq;

    fn pair(gap: f64, speed: f64) -> (RigidBodyState, RigidBodyState) {
        let a = create_asteroid(DVec3::ZERO, 1.0, 1.0)
            .with_velocity(DVec3::new(speed, 0.0, 0.0))
            .with_restitution(1.0);
        let b = create_asteroid(DVec3::new(2.0 - gap, 0.0, 0.0), 1.0, 1.0)
            .with_velocity(DVec3::new(-speed, 0.0, 0.0))
            .with_restitution(1.0);
        (a, b)
    }

    #[test]
    fn inelastic_contact_stops_approach() {
        let (mut a, mut b) = pair(0.005, 2.0);
        a.restitution = 0.0;
        let contact = detect_sphere_sphere_collision(a.position, 1.0, b.position, 1.0)
            .expect("spheres overlap");
        assert!(resolve_collision(&mut a, &mut b, &contact));

        let closing = (b.velocity - a.velocity).dot(contact.normal);
        assert_relative_eq!(closing, 0.0, epsilon = 1e-12);
        // Below the slop, so no positional push.
        assert_eq!(a.position, DVec3::ZERO);
    }

    #[test]
    fn penetration_beyond_slop_is_partially_corrected() {
        let (mut a, mut b) = pair(0.21, 1.0);
        let contact = detect_sphere_sphere_collision(a.position, 1.0, b.position, 1.0)
            .expect("spheres overlap");
        resolve_collision(&mut a, &mut b, &contact);

        // (0.21 − 0.01) / 2 · 0.2 per body.
        assert_relative_eq!(a.position.x, -0.02, epsilon = 1e-12);
        assert_relative_eq!(b.position.x, 1.79 + 0.02, epsilon = 1e-12);
    }

    #[test]
    fn off_center_hit_induces_spin() {
        let mut a = create_asteroid(DVec3::ZERO, 1.0, 1.0).with_velocity(DVec3::X);
        let mut b = create_asteroid(DVec3::new(1.9, 0.0, 0.0), 1.0, 1.0);
        let contact = CollisionInfo {
            point: DVec3::new(1.0, 0.5, 0.0),
            normal: DVec3::X,
            penetration: 0.1,
        };
        assert!(resolve_collision(&mut a, &mut b, &contact));
        assert!(a.angular_velocity.z.abs() > 0.0);
        assert!(b.angular_velocity.z.abs() > 0.0);
        // Linear momentum is conserved by the impulse pair.
        let momentum = a.linear_momentum() + b.linear_momentum();
        assert!(momentum.abs_diff_eq(DVec3::X, 1e-12));
    }
}
