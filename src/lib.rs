//! Orbital Rigid – rigid-body and orbital mechanics for spacecraft simulation.
//!
//! The crate provides quaternion orientation math, point-mass integrators
//! (semi-implicit Euler, Verlet, RK4), 6-DOF rigid-body stepping, sphere
//! collision with impulse response, and Keplerian orbital element
//! conversions. Everything works in `f64` SI units. [`PhysicsWorld`] ties the
//! pieces together behind a fixed time step.

pub mod collision;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod math;
pub mod utils;
pub mod world;

pub use glam::{DMat3, DQuat, DVec2, DVec3};

pub use collision::{
    detect_sphere_sphere_collision, resolve_collision, resolve_collision_with, CollisionInfo,
};
pub use config::{ContactSettings, InertiaFrame, IntegrationSettings, WorldConfig};
pub use core::{
    create_asteroid, create_rigid_body, create_satellite, create_spacecraft, BodyShape,
    PhysicsState, RigidBodyState,
};
pub use dynamics::{
    euler_step, integrate_rigid_body, rk4_step, state_to_orbital_elements, step_rigid_body,
    verlet_step, ForceFunction, IntegrationMethod, Integrator, OrbitalElements, Trajectory,
};
pub use error::PhysicsError;
pub use math::{InertiaTensorExt, Quaternion, VectorExt};
pub use utils::arena::BodyHandle;
pub use world::{BodyContact, PhysicsWorld};
