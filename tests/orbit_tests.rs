use approx::assert_relative_eq;
use orbital_rigid::dynamics::orbit::{
    circular_orbit_speed, orbital_elements_to_state, orbital_energy, orbital_period,
};
use orbital_rigid::*;
use proptest::prelude::*;
use std::f64::consts::TAU;

const MU_EARTH: f64 = 398_600.4418;

#[test]
fn circular_orbit_round_trip() {
    let radius = 7_000.0;
    let position = DVec3::new(radius, 0.0, 0.0);
    let velocity = DVec3::new(0.0, circular_orbit_speed(radius, MU_EARTH), 0.0);

    let elements = state_to_orbital_elements(position, velocity, MU_EARTH);
    assert_relative_eq!(elements.semi_major_axis, radius, max_relative = 1e-9);
    assert!(elements.eccentricity < 1e-9);
    assert!(elements.is_bound());

    let (back_position, back_velocity) = orbital_elements_to_state(&elements, MU_EARTH);
    assert!(back_position.distance(position) < 1e-6);
    assert!(back_velocity.distance(velocity) < 1e-9);
}

#[test]
fn low_earth_orbit_period() {
    // 7000 km circular orbit: roughly 97 minutes.
    let period = orbital_period(7_000.0, MU_EARTH);
    assert_relative_eq!(period / 60.0, 97.14, epsilon = 0.05);
}

#[test]
fn escape_speed_gives_parabolic_energy() {
    let radius = 7_000.0;
    let escape = (2.0 * MU_EARTH / radius).sqrt();
    let energy = orbital_energy(DVec3::new(radius, 0.0, 0.0), DVec3::new(0.0, escape, 0.0), MU_EARTH);
    assert!(energy.abs() < 1e-9);

    let elements = state_to_orbital_elements(
        DVec3::new(radius, 0.0, 0.0),
        DVec3::new(0.0, escape * 1.1, 0.0),
        MU_EARTH,
    );
    assert!(elements.eccentricity > 1.0);
    assert!(!elements.is_bound());
    assert!(elements.apoapsis().is_none());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Elements -> state -> elements -> state reproduces the orbit.
    #[test]
    fn prop_elliptical_round_trip(
        semi_major_axis in 7_000.0f64..42_000.0,
        eccentricity in 0.01f64..0.9,
        inclination in 0.1f64..3.0,
        node_fraction in 0.0f64..1.0,
        periapsis_fraction in 0.0f64..1.0,
        anomaly_fraction in 0.0f64..1.0,
    ) {
        let elements = OrbitalElements {
            semi_major_axis,
            eccentricity,
            inclination,
            longitude_of_ascending_node: node_fraction * TAU,
            argument_of_periapsis: periapsis_fraction * TAU,
            true_anomaly: anomaly_fraction * TAU,
        };

        let (position, velocity) = orbital_elements_to_state(&elements, MU_EARTH);
        let recovered = state_to_orbital_elements(position, velocity, MU_EARTH);

        prop_assert!(
            (recovered.semi_major_axis - semi_major_axis).abs() / semi_major_axis < 1e-8,
            "a: {} vs {}", recovered.semi_major_axis, semi_major_axis
        );
        prop_assert!((recovered.eccentricity - eccentricity).abs() < 1e-8);
        prop_assert!((recovered.inclination - inclination).abs() < 1e-6);

        let (position_again, velocity_again) = orbital_elements_to_state(&recovered, MU_EARTH);
        prop_assert!(
            position_again.distance(position) < position.length() * 1e-6,
            "{:?} vs {:?}", position_again, position
        );
        prop_assert!(velocity_again.distance(velocity) < velocity.length() * 1e-6);
    }
}
