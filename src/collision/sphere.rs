use glam::DVec3;
use log::trace;

use super::contact::CollisionInfo;
use crate::config::EPSILON;

/// Sphere–sphere overlap test.
///
/// Returns `None` when the spheres are apart, and also when the centers
/// coincide, since no contact normal can be derived then. Touching spheres
/// (distance exactly `r1 + r2`) report a zero-depth contact.
pub fn detect_sphere_sphere_collision(
    center_a: DVec3,
    radius_a: f64,
    center_b: DVec3,
    radius_b: f64,
) -> Option<CollisionInfo> {
    let delta = center_b - center_a;
    let distance = delta.length();

    if distance > radius_a + radius_b {
        return None;
    }
    if distance < EPSILON {
        trace!("coincident sphere centers at {center_a:?}, no contact normal");
        return None;
    }

    let normal = delta / distance;
    Some(CollisionInfo {
        point: center_a + normal * radius_a,
        normal,
        penetration: radius_a + radius_b - distance,
    })
}
