use glam::DMat3;
use serde::{Deserialize, Serialize};

use crate::math::matrix::InertiaTensorExt;

/// Canonical body shapes with closed-form inertia tensors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BodyShape {
    /// Full extents along X, Y and Z.
    Box { width: f64, height: f64, depth: f64 },
    Sphere { radius: f64 },
    /// Symmetry axis along Z.
    Cylinder { radius: f64, height: f64 },
}

impl BodyShape {
    /// Diagonal inertia tensor of a solid body of this shape.
    pub fn inertia(&self, mass: f64) -> DMat3 {
        match *self {
            BodyShape::Box {
                width,
                height,
                depth,
            } => DMat3::for_solid_box(width, height, depth, mass),
            BodyShape::Sphere { radius } => DMat3::for_solid_sphere(radius, mass),
            BodyShape::Cylinder { radius, height } => {
                DMat3::for_solid_cylinder(radius, height, mass)
            }
        }
    }

    /// Radius of the smallest origin-centred sphere enclosing the shape.
    pub fn bounding_radius(&self) -> f64 {
        match *self {
            BodyShape::Box {
                width,
                height,
                depth,
            } => 0.5 * (width * width + height * height + depth * depth).sqrt(),
            BodyShape::Sphere { radius } => radius,
            BodyShape::Cylinder { radius, height } => {
                (radius * radius + 0.25 * height * height).sqrt()
            }
        }
    }
}
