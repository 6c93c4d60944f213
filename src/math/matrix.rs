//! Inertia tensor helpers for `glam`'s `DMat3`.
//!
//! Every tensor built here is diagonal: bodies are modelled in their principal
//! axes and products of inertia are not supported. Because the matrices are
//! symmetric, glam's column-major storage reads the same as a row-major one.

use glam::{DMat3, DVec3};

use crate::config::EPSILON;
use crate::math::quaternion::Quaternion;

/// 3×3 matrix used for inertia tensors.
pub type Matrix3 = DMat3;

/// Closed-form inertia tensors and diagonal-only helpers.
pub trait InertiaTensorExt {
    /// Solid cuboid with full extents along X, Y and Z.
    fn for_solid_box(width: f64, height: f64, depth: f64, mass: f64) -> DMat3;
    fn for_solid_sphere(radius: f64, mass: f64) -> DMat3;
    /// Solid cylinder whose symmetry axis is Z.
    fn for_solid_cylinder(radius: f64, height: f64, mass: f64) -> DMat3;

    fn diagonal(&self) -> DVec3;

    /// Inverse of a diagonal matrix. Off-diagonal terms are ignored and a
    /// near-zero diagonal entry maps to zero (that axis cannot rotate).
    fn inverse_diagonal(&self) -> DMat3;

    /// `R·I·Rᵗ` for the rotation described by `orientation`.
    fn rotated(&self, orientation: &Quaternion) -> DMat3;

    fn is_diagonal(&self) -> bool;
}

impl InertiaTensorExt for DMat3 {
    fn for_solid_box(width: f64, height: f64, depth: f64, mass: f64) -> DMat3 {
        let factor = mass / 12.0;
        DMat3::from_diagonal(DVec3::new(
            factor * (height * height + depth * depth),
            factor * (width * width + depth * depth),
            factor * (width * width + height * height),
        ))
    }

    fn for_solid_sphere(radius: f64, mass: f64) -> DMat3 {
        DMat3::from_diagonal(DVec3::splat(0.4 * mass * radius * radius))
    }

    fn for_solid_cylinder(radius: f64, height: f64, mass: f64) -> DMat3 {
        let transverse = mass * (3.0 * radius * radius + height * height) / 12.0;
        let axial = 0.5 * mass * radius * radius;
        DMat3::from_diagonal(DVec3::new(transverse, transverse, axial))
    }

    fn diagonal(&self) -> DVec3 {
        DVec3::new(self.x_axis.x, self.y_axis.y, self.z_axis.z)
    }

    fn inverse_diagonal(&self) -> DMat3 {
        let recip = |value: f64| {
            if value.abs() < EPSILON {
                0.0
            } else {
                1.0 / value
            }
        };
        let d = self.diagonal();
        DMat3::from_diagonal(DVec3::new(recip(d.x), recip(d.y), recip(d.z)))
    }

    fn rotated(&self, orientation: &Quaternion) -> DMat3 {
        let rotation = orientation.to_rotation_matrix();
        rotation * *self * rotation.transpose()
    }

    fn is_diagonal(&self) -> bool {
        let off_diagonal = [
            self.x_axis.y,
            self.x_axis.z,
            self.y_axis.x,
            self.y_axis.z,
            self.z_axis.x,
            self.z_axis.y,
        ];
        off_diagonal.iter().all(|value| value.abs() < EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn box_tensor_matches_closed_form() {
        let tensor = DMat3::for_solid_box(2.0, 4.0, 6.0, 12.0);
        assert_eq!(tensor.diagonal(), DVec3::new(52.0, 40.0, 20.0));
        assert!(tensor.is_diagonal());
    }

    #[test]
    fn sphere_tensor_is_isotropic() {
        let tensor = DMat3::for_solid_sphere(2.0, 10.0);
        assert!(tensor.diagonal().abs_diff_eq(DVec3::splat(16.0), 1e-12));
    }

    #[test]
    fn cylinder_tensor_uses_z_as_symmetry_axis() {
        let tensor = DMat3::for_solid_cylinder(2.0, 3.0, 500.0);
        let d = tensor.diagonal();
        assert_relative_eq!(d.x, 500.0 * (12.0 + 9.0) / 12.0, epsilon = 1e-9);
        assert_relative_eq!(d.y, d.x, epsilon = 1e-12);
        assert_relative_eq!(d.z, 0.5 * 500.0 * 4.0, epsilon = 1e-9);
    }

    #[test]
    fn inverse_diagonal_inverts_and_guards_zero() {
        let tensor = DMat3::from_diagonal(DVec3::new(2.0, 0.0, 0.5));
        let inverse = tensor.inverse_diagonal();
        assert_eq!(inverse.diagonal(), DVec3::new(0.5, 0.0, 2.0));
        assert!(inverse.is_finite());
    }

    #[test]
    fn rotating_a_tensor_swaps_principal_axes() {
        let tensor = DMat3::from_diagonal(DVec3::new(1.0, 2.0, 3.0));
        let quarter_turn = Quaternion::from_axis_angle(DVec3::Z, FRAC_PI_2);
        let rotated = tensor.rotated(&quarter_turn);
        let d = rotated.diagonal();
        assert_relative_eq!(d.x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(d.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(d.z, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn isotropic_tensor_is_rotation_invariant() {
        let tensor = DMat3::for_solid_sphere(1.0, 5.0);
        let q = Quaternion::from_euler(0.3, 0.2, 0.1);
        let rotated = tensor.rotated(&q);
        assert!(rotated.abs_diff_eq(tensor, 1e-12));
    }
}
