use glam::{DMat3, DVec3};
use serde::{Deserialize, Serialize};

use super::shape::BodyShape;
use crate::config::{
    InertiaFrame, ASTEROID_FRICTION, ASTEROID_RESTITUTION, DEFAULT_FRICTION, DEFAULT_RESTITUTION,
};
use crate::error::PhysicsError;
use crate::math::{matrix::InertiaTensorExt, quaternion::Quaternion};

/// Full 6-DOF state of a rigid body.
///
/// `force` and `torque` are single-step accumulators: fill them through the
/// `apply_*` methods, then integrate, which consumes and clears them. Writing
/// `orientation` or the accumulators directly can break the unit-quaternion
/// and zero-after-step guarantees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidBodyState {
    pub position: DVec3,
    pub velocity: DVec3,
    pub force: DVec3,

    pub orientation: Quaternion,
    pub angular_velocity: DVec3,
    pub torque: DVec3,

    /// Must be positive; not checked (see [`RigidBodyState::validate`]).
    pub mass: f64,
    pub inertia_tensor: DMat3,
    pub inertia_tensor_inverse: DMat3,

    pub restitution: f64,
    pub friction: f64,
}

/// Builds a body at rest with identity orientation and default material.
pub fn create_rigid_body(position: DVec3, mass: f64, inertia_tensor: DMat3) -> RigidBodyState {
    RigidBodyState {
        position,
        velocity: DVec3::ZERO,
        force: DVec3::ZERO,
        orientation: Quaternion::IDENTITY,
        angular_velocity: DVec3::ZERO,
        torque: DVec3::ZERO,
        mass,
        inertia_tensor,
        inertia_tensor_inverse: inertia_tensor.inverse_diagonal(),
        restitution: DEFAULT_RESTITUTION,
        friction: DEFAULT_FRICTION,
    }
}

/// Box-shaped spacecraft with full extents along X, Y and Z.
pub fn create_spacecraft(
    position: DVec3,
    mass: f64,
    width: f64,
    height: f64,
    depth: f64,
) -> RigidBodyState {
    RigidBodyState::from_shape(
        position,
        mass,
        &BodyShape::Box {
            width,
            height,
            depth,
        },
    )
}

/// Cylindrical satellite whose symmetry axis is Z.
pub fn create_satellite(position: DVec3, mass: f64, radius: f64, height: f64) -> RigidBodyState {
    RigidBodyState::from_shape(position, mass, &BodyShape::Cylinder { radius, height })
}

/// Solid spherical asteroid. Rougher and less bouncy than the defaults.
pub fn create_asteroid(position: DVec3, mass: f64, radius: f64) -> RigidBodyState {
    RigidBodyState::from_shape(position, mass, &BodyShape::Sphere { radius })
        .with_restitution(ASTEROID_RESTITUTION)
        .with_friction(ASTEROID_FRICTION)
}

impl RigidBodyState {
    pub fn from_shape(position: DVec3, mass: f64, shape: &BodyShape) -> Self {
        create_rigid_body(position, mass, shape.inertia(mass))
    }

    pub fn with_velocity(mut self, velocity: DVec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_angular_velocity(mut self, angular_velocity: DVec3) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    pub fn with_orientation(mut self, orientation: Quaternion) -> Self {
        self.orientation = orientation.normalize();
        self
    }

    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = friction;
        self
    }

    /// Accumulates a force acting through the center of mass.
    pub fn apply_force(&mut self, force: DVec3) {
        self.force += force;
    }

    /// Accumulates a force applied at a world-space point: the linear part plus
    /// the torque `r × F` about the center of mass.
    pub fn apply_force_at_point(&mut self, force: DVec3, point: DVec3) {
        self.force += force;
        self.torque += (point - self.position).cross(force);
    }

    pub fn apply_torque(&mut self, torque: DVec3) {
        self.torque += torque;
    }

    /// Unchecked reciprocal: a zero mass yields infinity.
    pub fn inverse_mass(&self) -> f64 {
        1.0 / self.mass
    }

    /// Inverse inertia in the requested frame.
    pub fn inverse_inertia(&self, frame: InertiaFrame) -> DMat3 {
        match frame {
            InertiaFrame::Body => self.inertia_tensor_inverse,
            InertiaFrame::World => self.inertia_tensor_inverse.rotated(&self.orientation),
        }
    }

    /// Body-local point to world space.
    pub fn local_to_world(&self, local_point: DVec3) -> DVec3 {
        self.position + self.orientation.rotate_vector(local_point)
    }

    /// World-space point to body-local coordinates.
    pub fn world_to_local(&self, world_point: DVec3) -> DVec3 {
        self.orientation
            .conjugate()
            .rotate_vector(world_point - self.position)
    }

    pub fn local_direction_to_world(&self, local_direction: DVec3) -> DVec3 {
        self.orientation.rotate_vector(local_direction)
    }

    pub fn world_direction_to_local(&self, world_direction: DVec3) -> DVec3 {
        self.orientation.conjugate().rotate_vector(world_direction)
    }

    /// Velocity of the material point at `world_point`: `v + ω × r`.
    pub fn velocity_at_point(&self, world_point: DVec3) -> DVec3 {
        self.velocity + self.angular_velocity.cross(world_point - self.position)
    }

    pub fn linear_momentum(&self) -> DVec3 {
        self.velocity * self.mass
    }

    /// World-space angular momentum `L = (R·I·Rᵗ)·ω`.
    pub fn angular_momentum(&self) -> DVec3 {
        self.inertia_tensor.rotated(&self.orientation) * self.angular_velocity
    }

    /// Translational plus rotational kinetic energy.
    pub fn kinetic_energy(&self) -> f64 {
        let linear = 0.5 * self.mass * self.velocity.length_squared();
        let angular = 0.5 * self.angular_velocity.dot(self.angular_momentum());
        linear + angular
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.velocity.is_finite()
            && self.angular_velocity.is_finite()
            && self.orientation.magnitude().is_finite()
    }

    /// Opt-in sanity check of construction parameters. Integration never calls
    /// this, so malformed bodies still propagate NaN/infinity when stepped.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(PhysicsError::InvalidMass(self.mass));
        }
        if !self.inertia_tensor.is_finite() {
            return Err(PhysicsError::InvalidInertia(
                "tensor contains non-finite entries".to_string(),
            ));
        }
        if !self.inertia_tensor.is_diagonal() {
            return Err(PhysicsError::InvalidInertia(
                "only diagonal tensors are supported".to_string(),
            ));
        }
        let diagonal = self.inertia_tensor.diagonal();
        if diagonal.min_element() <= 0.0 {
            return Err(PhysicsError::InvalidInertia(format!(
                "principal moments must be positive, got {diagonal:?}"
            )));
        }
        let norm = self.orientation.magnitude();
        if (norm - 1.0).abs() > 1e-6 {
            return Err(PhysicsError::NonUnitOrientation(norm));
        }
        for (name, value) in [
            ("restitution", self.restitution),
            ("friction", self.friction),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(PhysicsError::CoefficientOutOfRange { name, value });
            }
        }
        Ok(())
    }
}
