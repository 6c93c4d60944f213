//! Error type for the fallible parts of the public API.
//!
//! The numerical core itself never fails: degenerate inputs resolve to zero
//! vectors, `None`, or no-ops. Errors only come from handle lookups and from
//! opt-in validation.

use crate::utils::arena::BodyHandle;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    #[error("no rigid body registered for {0:?}")]
    UnknownBody(BodyHandle),

    #[error("invalid mass {0}: mass must be positive and finite")]
    InvalidMass(f64),

    #[error("invalid inertia tensor: {0}")]
    InvalidInertia(String),

    #[error("orientation is not a unit quaternion (|q| = {0})")]
    NonUnitOrientation(f64),

    #[error("{name} must lie in [0, 1], got {value}")]
    CoefficientOutOfRange { name: &'static str, value: f64 },

    #[error("invalid collider radius {0}")]
    InvalidRadius(f64),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
