//! Collision detection and impulse response. Only sphere–sphere pairs are
//! detected; response works for any contact expressed as a [`CollisionInfo`].

pub mod contact;
pub mod sphere;

pub use contact::{resolve_collision, resolve_collision_with, CollisionInfo};
pub use sphere::detect_sphere_sphere_collision;
