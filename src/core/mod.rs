//! Body state: point-mass state, rigid-body state, and the shapes used to
//! derive inertia tensors.

pub mod rigidbody;
pub mod shape;
pub mod state;

pub use rigidbody::{
    create_asteroid, create_rigid_body, create_satellite, create_spacecraft, RigidBodyState,
};
pub use shape::BodyShape;
pub use state::PhysicsState;
