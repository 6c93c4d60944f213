//! Vector helpers layered on top of `glam`'s double-precision types.
//!
//! Arithmetic (add, sub, scale, dot, cross, length, distance, lerp) comes
//! straight from `glam`; everything here adds the epsilon-guarded behavior the
//! simulation relies on.

use glam::{DVec2, DVec3};

use crate::config::EPSILON;

/// Two-component vector used throughout the core.
pub type Vec2 = DVec2;

/// Three-component vector used throughout the core.
pub type Vec3 = DVec3;

/// Epsilon-safe operations shared by [`Vec2`] and [`Vec3`].
pub trait VectorExt: Sized {
    /// Unit vector in the same direction, or zero when the magnitude is below
    /// [`EPSILON`].
    fn safe_normalize(self) -> Self;

    /// Component-wise check that no NaN or infinity slipped in.
    fn is_finite_vector(self) -> bool;
}

impl VectorExt for DVec2 {
    fn safe_normalize(self) -> Self {
        let magnitude = self.length();
        if magnitude < EPSILON {
            DVec2::ZERO
        } else {
            self / magnitude
        }
    }

    fn is_finite_vector(self) -> bool {
        self.is_finite()
    }
}

impl VectorExt for DVec3 {
    fn safe_normalize(self) -> Self {
        let magnitude = self.length();
        if magnitude < EPSILON {
            DVec3::ZERO
        } else {
            self / magnitude
        }
    }

    fn is_finite_vector(self) -> bool {
        self.is_finite()
    }
}
