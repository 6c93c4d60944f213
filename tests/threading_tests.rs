use orbital_rigid::*;
use std::sync::{Arc, Mutex};
use std::thread;

#[test]
fn test_value_types_are_send_and_sync() {
    fn assert_sync_send<T: Sync + Send>() {}
    assert_sync_send::<PhysicsWorld>();
    assert_sync_send::<RigidBodyState>();
    assert_sync_send::<PhysicsState>();
    assert_sync_send::<Trajectory>();
    assert_sync_send::<Quaternion>();
}

fn scattered_world(parallel: bool) -> (PhysicsWorld, Vec<BodyHandle>) {
    let config = WorldConfig::default().with_parallel(parallel).with_substeps(2);
    let mut world = PhysicsWorld::new(config).expect("valid config");
    let mut handles = Vec::new();
    for i in 0..64 {
        let offset = i as f64;
        let body = create_asteroid(DVec3::new(offset * 1.5, (offset * 0.7).sin(), 0.0), 2.0, 1.0)
            .with_velocity(DVec3::new((offset * 1.3).cos(), 0.0, 0.1))
            .with_angular_velocity(DVec3::new(0.0, offset * 0.01, 0.2));
        let handle = world.add_sphere_body(body, 1.0).expect("valid radius");
        handles.push(handle);
    }
    (world, handles)
}

#[test]
fn test_parallel_stepping_matches_sequential() {
    let (mut sequential, handles) = scattered_world(false);
    let (mut parallel, _) = scattered_world(true);

    for step in 0..120 {
        for (i, &handle) in handles.iter().enumerate() {
            let torque = DVec3::new(0.0, 0.0, (step + i) as f64 * 1e-3);
            sequential.apply_torque(handle, torque).expect("live handle");
            parallel.apply_torque(handle, torque).expect("live handle");
        }
        sequential.step();
        parallel.step();
    }

    for &handle in &handles {
        assert_eq!(sequential.body(handle), parallel.body(handle));
    }
}

#[test]
fn test_shared_world_across_threads() {
    let world = Arc::new(Mutex::new(PhysicsWorld::default()));
    {
        let mut guard = world.lock().unwrap();
        guard.add_body(create_asteroid(DVec3::ZERO, 1.0, 1.0).with_velocity(DVec3::X));
    }

    let mut handles = vec![];
    for _ in 0..4 {
        let world_clone = Arc::clone(&world);
        handles.push(thread::spawn(move || {
            let mut world = world_clone.lock().unwrap();
            world.step();
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    let world = world.lock().unwrap();
    assert!((world.time() - 4.0 / 60.0).abs() < 1e-12);
}
