//! Utility helpers: the body arena, logging, and step profiling.

pub mod arena;
pub mod logging;
pub mod profiling;

pub use arena::{Arena, BodyHandle};
pub use profiling::StepProfile;
