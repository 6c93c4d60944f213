//! Unit quaternion used for body orientation.
//!
//! Stored in (w, x, y, z) order. Every constructor that yields a rotation
//! normalizes before returning, so a `Quaternion` handed out by this module is
//! always a valid rotation. [`Quaternion::new`] and the arithmetic operators are
//! the exception: they are raw building blocks for derivatives and blending.

use std::ops::{Add, Mul, Neg};

use glam::{DMat3, DQuat, DVec3, EulerRot};
use serde::{Deserialize, Serialize};

use crate::config::{EPSILON, SLERP_DOT_THRESHOLD};
use crate::math::vector::VectorExt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    pub const IDENTITY: Self = Self {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Raw constructor; the result is not normalized.
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// Pure quaternion `(0, v)`.
    pub fn pure(v: DVec3) -> Self {
        Self::new(0.0, v.x, v.y, v.z)
    }

    /// Rotation of `angle` radians about `axis`. A degenerate axis yields the
    /// identity.
    pub fn from_axis_angle(axis: DVec3, angle: f64) -> Self {
        let axis = axis.safe_normalize();
        if axis == DVec3::ZERO {
            return Self::IDENTITY;
        }
        let (sin, cos) = (angle * 0.5).sin_cos();
        Self::new(cos, axis.x * sin, axis.y * sin, axis.z * sin).normalize()
    }

    /// Builds a rotation from Tait-Bryan angles in ZYX order: yaw about Z,
    /// then pitch about Y, then roll about X.
    pub fn from_euler(roll: f64, pitch: f64, yaw: f64) -> Self {
        DQuat::from_euler(EulerRot::ZYX, yaw, pitch, roll).into()
    }

    /// Inverse of [`Quaternion::from_euler`], returned as `(roll, pitch, yaw)`.
    ///
    /// The pitch `asin` argument is clamped to `[-1, 1]` so gimbal lock
    /// produces ±π/2 instead of NaN.
    pub fn to_euler(&self) -> DVec3 {
        let Self { w, x, y, z } = *self;

        let roll = (2.0 * (w * x + y * z)).atan2(1.0 - 2.0 * (x * x + y * y));
        let pitch = (2.0 * (w * y - z * x)).clamp(-1.0, 1.0).asin();
        let yaw = (2.0 * (w * z + x * y)).atan2(1.0 - 2.0 * (y * y + z * z));

        DVec3::new(roll, pitch, yaw)
    }

    /// Hamilton product `self · other`. Not commutative: the result applies
    /// `other` first, then `self`.
    pub fn multiply(&self, other: &Self) -> Self {
        let (a, b) = (self, other);
        Self::new(
            a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
            a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
        )
    }

    /// Rotates `v` by this quaternion (`q·v·q⁻¹`) using the closed form
    /// `v + w·t + u×t` with `t = 2·(u×v)`.
    pub fn rotate_vector(&self, v: DVec3) -> DVec3 {
        let u = self.vector_part();
        let t = 2.0 * u.cross(v);
        v + self.w * t + u.cross(t)
    }

    /// Conjugate. Equals the inverse only for unit quaternions.
    pub fn conjugate(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn magnitude(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit quaternion in the same direction, or the identity when the
    /// magnitude is below [`EPSILON`].
    pub fn normalize(&self) -> Self {
        let magnitude = self.magnitude();
        if magnitude < EPSILON {
            return Self::IDENTITY;
        }
        *self * (1.0 / magnitude)
    }

    /// Spherical interpolation along the shorter arc.
    ///
    /// Nearly parallel inputs (dot above [`SLERP_DOT_THRESHOLD`]) blend
    /// linearly and renormalize, since `sin θ` approaches zero there.
    pub fn slerp(&self, other: &Self, t: f64) -> Self {
        let mut end = *other;
        let mut dot = self.dot(other);
        if dot < 0.0 {
            end = -end;
            dot = -dot;
        }

        if dot > SLERP_DOT_THRESHOLD {
            return (*self + (end + -*self) * t).normalize();
        }

        DQuat::from(*self).slerp(DQuat::from(end), t).into()
    }

    /// Time derivative `q̇ = ½·(0, ω)·q` for a world-space angular velocity.
    pub fn derivative(&self, angular_velocity: DVec3) -> Self {
        Self::pure(angular_velocity).multiply(self) * 0.5
    }

    /// Advances the orientation by one explicit Euler step of the quaternion
    /// derivative and renormalizes.
    pub fn integrate(&self, angular_velocity: DVec3, dt: f64) -> Self {
        (*self + self.derivative(angular_velocity) * dt).normalize()
    }

    /// Rotation matrix equivalent of this quaternion.
    pub fn to_rotation_matrix(&self) -> DMat3 {
        DMat3::from_quat(DQuat::from(*self))
    }

    fn vector_part(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }
}

impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: Quaternion) -> Quaternion {
        self.multiply(&rhs)
    }
}

impl Mul<f64> for Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: f64) -> Quaternion {
        Quaternion::new(self.w * rhs, self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Add for Quaternion {
    type Output = Quaternion;

    fn add(self, rhs: Quaternion) -> Quaternion {
        Quaternion::new(
            self.w + rhs.w,
            self.x + rhs.x,
            self.y + rhs.y,
            self.z + rhs.z,
        )
    }
}

impl Neg for Quaternion {
    type Output = Quaternion;

    fn neg(self) -> Quaternion {
        Quaternion::new(-self.w, -self.x, -self.y, -self.z)
    }
}

impl From<DQuat> for Quaternion {
    fn from(q: DQuat) -> Self {
        Quaternion::new(q.w, q.x, q.y, q.z).normalize()
    }
}

impl From<Quaternion> for DQuat {
    fn from(q: Quaternion) -> Self {
        DQuat::from_xyzw(q.x, q.y, q.z, q.w)
    }
}
