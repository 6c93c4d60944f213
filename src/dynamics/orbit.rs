//! Classical orbital elements from Cartesian state vectors.
//!
//! Angles are in radians; `mu` is the gravitational parameter `G·M` of the
//! central body in units consistent with the position and velocity given.
//! Near-circular and near-equatorial orbits have undefined node or periapsis
//! angles; those default to zero instead of failing.

use std::f64::consts::TAU;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::config::EPSILON;
use crate::math::vector::VectorExt;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// Infinite for a parabolic trajectory, negative for a hyperbolic one.
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    /// Ω, measured from +X in the reference plane.
    pub longitude_of_ascending_node: f64,
    /// ω, measured from the ascending node.
    pub argument_of_periapsis: f64,
    /// ν, measured from periapsis.
    pub true_anomaly: f64,
}

impl OrbitalElements {
    pub fn is_bound(&self) -> bool {
        self.eccentricity < 1.0 && self.semi_major_axis.is_finite() && self.semi_major_axis > 0.0
    }

    pub fn periapsis(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    pub fn apoapsis(&self) -> Option<f64> {
        self.is_bound()
            .then(|| self.semi_major_axis * (1.0 + self.eccentricity))
    }
}

/// Specific angular momentum `h = r × v`.
pub fn specific_angular_momentum(position: DVec3, velocity: DVec3) -> DVec3 {
    position.cross(velocity)
}

/// Specific orbital energy from vis-viva: `v²/2 − μ/r`. The potential term
/// is dropped when `r` is below [`EPSILON`].
pub fn orbital_energy(position: DVec3, velocity: DVec3, mu: f64) -> f64 {
    let kinetic = 0.5 * velocity.length_squared();
    let r = position.length();
    if r < EPSILON {
        return kinetic;
    }
    kinetic - mu / r
}

/// Kepler's third law: `T = 2π·√(a³/μ)`.
pub fn orbital_period(semi_major_axis: f64, mu: f64) -> f64 {
    if mu.abs() < EPSILON {
        return 0.0;
    }
    TAU * (semi_major_axis.powi(3) / mu).sqrt()
}

/// Speed of a circular orbit of radius `radius`.
pub fn circular_orbit_speed(radius: f64, mu: f64) -> f64 {
    if radius.abs() < EPSILON {
        return 0.0;
    }
    (mu / radius).sqrt()
}

fn clamped_acos(value: f64) -> f64 {
    value.clamp(-1.0, 1.0).acos()
}

/// Derives the classical elements of the orbit through `position` with
/// `velocity` about a body with gravitational parameter `mu`.
///
/// A `mu` below [`EPSILON`] yields all-zero elements.
pub fn state_to_orbital_elements(position: DVec3, velocity: DVec3, mu: f64) -> OrbitalElements {
    if mu.abs() < EPSILON {
        return OrbitalElements::default();
    }

    let r = position.length();
    let h = specific_angular_momentum(position, velocity);
    let h_mag = h.length();

    // Node vector ẑ × h.
    let node = DVec3::new(-h.y, h.x, 0.0);
    let node_mag = node.length();

    let eccentricity_vector = velocity.cross(h) / mu - position.safe_normalize();
    let eccentricity = eccentricity_vector.length();

    let energy = orbital_energy(position, velocity, mu);
    let semi_major_axis = if energy.abs() < EPSILON {
        f64::INFINITY
    } else {
        -mu / (2.0 * energy)
    };

    let inclination = if h_mag < EPSILON {
        0.0
    } else {
        clamped_acos(h.z / h_mag)
    };

    let longitude_of_ascending_node = if node_mag < EPSILON {
        0.0
    } else {
        let omega = clamped_acos(node.x / node_mag);
        if node.y < 0.0 {
            TAU - omega
        } else {
            omega
        }
    };

    let argument_of_periapsis = if node_mag < EPSILON || eccentricity < EPSILON {
        0.0
    } else {
        let omega = clamped_acos(node.dot(eccentricity_vector) / (node_mag * eccentricity));
        if eccentricity_vector.z < 0.0 {
            TAU - omega
        } else {
            omega
        }
    };

    let true_anomaly = if eccentricity < EPSILON {
        0.0
    } else {
        let nu = clamped_acos(eccentricity_vector.dot(position) / (eccentricity * r));
        if position.dot(velocity) < 0.0 {
            TAU - nu
        } else {
            nu
        }
    };

    OrbitalElements {
        semi_major_axis,
        eccentricity,
        inclination,
        longitude_of_ascending_node,
        argument_of_periapsis,
        true_anomaly,
    }
}

/// Inverse of [`state_to_orbital_elements`] for non-parabolic orbits: rotates
/// the perifocal position and velocity into the reference frame.
pub fn orbital_elements_to_state(elements: &OrbitalElements, mu: f64) -> (DVec3, DVec3) {
    let e = elements.eccentricity;
    let nu = elements.true_anomaly;
    let p = elements.semi_major_axis * (1.0 - e * e);

    let (sin_nu, cos_nu) = nu.sin_cos();
    let r = p / (1.0 + e * cos_nu);
    let position_pf = DVec3::new(r * cos_nu, r * sin_nu, 0.0);
    let speed_factor = (mu / p).sqrt();
    let velocity_pf = DVec3::new(-speed_factor * sin_nu, speed_factor * (e + cos_nu), 0.0);

    let (sin_raan, cos_raan) = elements.longitude_of_ascending_node.sin_cos();
    let (sin_argp, cos_argp) = elements.argument_of_periapsis.sin_cos();
    let (sin_i, cos_i) = elements.inclination.sin_cos();

    // Columns of R3(−Ω)·R1(−i)·R3(−ω).
    let p_axis = DVec3::new(
        cos_raan * cos_argp - sin_raan * sin_argp * cos_i,
        sin_raan * cos_argp + cos_raan * sin_argp * cos_i,
        sin_argp * sin_i,
    );
    let q_axis = DVec3::new(
        -cos_raan * sin_argp - sin_raan * cos_argp * cos_i,
        -sin_raan * sin_argp + cos_raan * cos_argp * cos_i,
        cos_argp * sin_i,
    );

    let to_inertial = |v: DVec3| p_axis * v.x + q_axis * v.y;
    (to_inertial(position_pf), to_inertial(velocity_pf))
}
