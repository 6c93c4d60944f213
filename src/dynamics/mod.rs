//! Simulation dynamics: force models, point-mass integrators, rigid-body
//! stepping, and Keplerian orbit conversions.

pub mod forces;
pub mod integrator;
pub mod orbit;
pub mod rigid;

pub use forces::{
    combine, CombinedForce, ConstantForce, DampingForce, DragForce, ForceFunction, GravityForce,
    SpringForce,
};
pub use integrator::{
    euler_step, rk4_step, verlet_step, IntegrationMethod, Integrator, Trajectory,
};
pub use orbit::{
    circular_orbit_speed, orbital_elements_to_state, orbital_energy, orbital_period,
    specific_angular_momentum, state_to_orbital_elements, OrbitalElements,
};
pub use rigid::{
    integrate_rigid_body, integrate_rigid_body_with, step_rigid_body, step_rigid_body_with,
};
