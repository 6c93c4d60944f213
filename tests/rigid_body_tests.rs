use approx::assert_relative_eq;
use orbital_rigid::dynamics::rigid::integrate_rigid_body_with;
use orbital_rigid::*;
use proptest::prelude::*;
use std::f64::consts::PI;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Orientation must stay on the unit sphere however hard the body spins.
    #[test]
    fn prop_orientation_stays_unit(
        wx in -10.0f64..10.0,
        wy in -10.0f64..10.0,
        wz in -10.0f64..10.0,
        tx in -50.0f64..50.0,
        ty in -50.0f64..50.0,
        tz in -50.0f64..50.0,
        dt in 1e-3f64..0.05,
    ) {
        let mut body = create_spacecraft(DVec3::ZERO, 500.0, 2.0, 1.0, 3.0)
            .with_angular_velocity(DVec3::new(wx, wy, wz));

        for _ in 0..500 {
            body.apply_torque(DVec3::new(tx, ty, tz));
            integrate_rigid_body(&mut body, dt);
            let norm = body.orientation.magnitude();
            prop_assert!((norm - 1.0).abs() < 1e-6, "|q| = {}", norm);
        }
    }

    #[test]
    fn prop_world_inertia_frame_also_keeps_unit_norm(
        wx in -5.0f64..5.0,
        wz in -5.0f64..5.0,
        roll in -PI..PI,
    ) {
        let settings = IntegrationSettings { inertia_frame: InertiaFrame::World };
        let mut body = create_satellite(DVec3::ZERO, 100.0, 0.5, 2.0)
            .with_orientation(Quaternion::from_euler(roll, 0.3, -0.2))
            .with_angular_velocity(DVec3::new(wx, 0.0, wz));

        for _ in 0..200 {
            body.apply_torque(DVec3::new(1.0, -2.0, 0.5));
            integrate_rigid_body_with(&mut body, 0.02, &settings);
            prop_assert!((body.orientation.magnitude() - 1.0).abs() < 1e-6);
        }
    }
}

#[test]
fn satellite_pushed_off_axis_starts_tumbling() {
    let position = DVec3::new(7_000.0, 0.0, 0.0);
    let mut satellite = create_satellite(position, 500.0, 2.0, 3.0);
    let force = DVec3::new(0.0, 1_000.0, 0.0);
    let dt = 0.01;

    satellite.apply_force_at_point(force, DVec3::new(7_000.0, 0.0, 1.5));
    // r = (0, 0, 1.5), so τ = r × F = (−1500, 0, 0).
    assert_relative_eq!(satellite.torque.x, -1_500.0, epsilon = 1e-9);

    integrate_rigid_body(&mut satellite, dt);

    // Transverse inertia m(3r² + h²)/12 = 875.
    assert_relative_eq!(satellite.velocity.y, 0.02, epsilon = 1e-12);
    assert_relative_eq!(satellite.angular_velocity.x, -1_500.0 / 875.0 * dt, epsilon = 1e-12);
    assert_relative_eq!(satellite.angular_velocity.dot(force), 0.0, epsilon = 1e-9);
    assert!(satellite.angular_velocity.length() > 0.0);

    assert_eq!(satellite.force, DVec3::ZERO);
    assert_eq!(satellite.torque, DVec3::ZERO);
    assert_relative_eq!(satellite.orientation.magnitude(), 1.0, epsilon = 1e-12);
}

#[test]
fn pure_step_leaves_input_untouched() {
    let mut body = create_asteroid(DVec3::ZERO, 10.0, 1.0).with_velocity(DVec3::X);
    body.apply_torque(DVec3::Z);
    let before = body;

    let next = step_rigid_body(&body, 0.5);

    assert_eq!(body, before);
    assert_relative_eq!(next.position.x, 0.5, epsilon = 1e-12);
    assert_eq!(next.torque, DVec3::ZERO);
    assert!(next.angular_velocity.z > 0.0);
}

#[test]
fn torque_free_spin_keeps_angular_velocity() {
    let mut body =
        create_spacecraft(DVec3::ZERO, 200.0, 1.0, 2.0, 3.0).with_angular_velocity(DVec3::Z * 0.5);
    for _ in 0..600 {
        integrate_rigid_body(&mut body, 1.0 / 60.0);
    }

    assert_eq!(body.angular_velocity, DVec3::Z * 0.5);
    // 10 s at 0.5 rad/s about Z.
    let heading = body.local_direction_to_world(DVec3::X);
    assert_relative_eq!(heading.x, 5.0f64.cos(), epsilon = 1e-3);
    assert_relative_eq!(heading.y, 5.0f64.sin(), epsilon = 1e-3);
}

#[test]
fn validation_is_opt_in() {
    let body = create_rigid_body(DVec3::ZERO, 0.0, DMat3::IDENTITY);
    assert_eq!(body.validate(), Err(PhysicsError::InvalidMass(0.0)));

    let good = create_asteroid(DVec3::ZERO, 5.0, 1.0);
    assert!(good.validate().is_ok());
}
