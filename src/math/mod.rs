//! Vector, quaternion, and inertia-tensor math built on `glam`'s `f64` types.

pub mod matrix;
pub mod quaternion;
pub mod vector;

pub use matrix::{InertiaTensorExt, Matrix3};
pub use quaternion::Quaternion;
pub use vector::{Vec2, Vec3, VectorExt};
