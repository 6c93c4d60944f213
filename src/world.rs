use std::collections::HashMap;
use std::time::{Duration, Instant};

use glam::DVec3;
use log::{debug, trace};

use crate::collision::{detect_sphere_sphere_collision, resolve_collision_with, CollisionInfo};
use crate::config::{IntegrationSettings, WorldConfig};
use crate::core::rigidbody::RigidBodyState;
use crate::core::shape::BodyShape;
use crate::dynamics::rigid::integrate_rigid_body_with;
use crate::error::PhysicsError;
use crate::utils::arena::{Arena, BodyHandle};
use crate::utils::logging::{warn_if_frame_budget_exceeded, ScopedTimer};
use crate::utils::profiling::StepProfile;

/// Contact found between two sphere-collider bodies during a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyContact {
    pub first: BodyHandle,
    pub second: BodyHandle,
    pub info: CollisionInfo,
}

/// Owns rigid bodies and advances them with a fixed time step.
///
/// Each step integrates every body, then detects and resolves sphere
/// contacts pairwise in handle order. Forces and torques applied between
/// steps act over every substep of the next step and are cleared afterwards.
pub struct PhysicsWorld {
    bodies: Arena<RigidBodyState>,
    sphere_radii: HashMap<BodyHandle, f64>,
    config: WorldConfig,
    time: f64,
    time_accumulated: f64,
    profile: StepProfile,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::with_valid_config(WorldConfig::default())
    }
}

impl PhysicsWorld {
    pub fn new(config: WorldConfig) -> Result<Self, PhysicsError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: WorldConfig) -> Self {
        Self {
            bodies: Arena::new(),
            sphere_radii: HashMap::new(),
            config,
            time: 0.0,
            time_accumulated: 0.0,
            profile: StepProfile::default(),
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Simulated time in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Profile of the most recent step.
    pub fn profile(&self) -> &StepProfile {
        &self.profile
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn add_body(&mut self, body: RigidBodyState) -> BodyHandle {
        let handle = self.bodies.insert(body);
        trace!("added body {handle:?} at {:?}", body.position);
        handle
    }

    /// Adds a body that collides as a sphere of `radius` around its center.
    pub fn add_sphere_body(
        &mut self,
        body: RigidBodyState,
        radius: f64,
    ) -> Result<BodyHandle, PhysicsError> {
        check_radius(radius)?;
        let handle = self.add_body(body);
        self.sphere_radii.insert(handle, radius);
        Ok(handle)
    }

    /// Builds a body from `shape` and collides it as its bounding sphere.
    pub fn add_shaped_body(
        &mut self,
        shape: &BodyShape,
        position: DVec3,
        mass: f64,
    ) -> Result<BodyHandle, PhysicsError> {
        self.add_sphere_body(
            RigidBodyState::from_shape(position, mass, shape),
            shape.bounding_radius(),
        )
    }

    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<RigidBodyState> {
        self.sphere_radii.remove(&handle);
        self.bodies.remove(handle)
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.contains(handle)
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBodyState> {
        self.bodies.get(handle)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Result<&mut RigidBodyState, PhysicsError> {
        self.bodies
            .get_mut(handle)
            .ok_or(PhysicsError::UnknownBody(handle))
    }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &RigidBodyState)> + '_ {
        self.bodies.iter()
    }

    /// Gives an existing body a sphere collider, replacing any previous one.
    pub fn attach_sphere(&mut self, handle: BodyHandle, radius: f64) -> Result<(), PhysicsError> {
        check_radius(radius)?;
        if !self.bodies.contains(handle) {
            return Err(PhysicsError::UnknownBody(handle));
        }
        self.sphere_radii.insert(handle, radius);
        Ok(())
    }

    pub fn detach_sphere(&mut self, handle: BodyHandle) -> Option<f64> {
        self.sphere_radii.remove(&handle)
    }

    pub fn sphere_radius(&self, handle: BodyHandle) -> Option<f64> {
        self.sphere_radii.get(&handle).copied()
    }

    pub fn apply_force(&mut self, handle: BodyHandle, force: DVec3) -> Result<(), PhysicsError> {
        self.body_mut(handle)?.apply_force(force);
        Ok(())
    }

    pub fn apply_force_at_point(
        &mut self,
        handle: BodyHandle,
        force: DVec3,
        point: DVec3,
    ) -> Result<(), PhysicsError> {
        self.body_mut(handle)?.apply_force_at_point(force, point);
        Ok(())
    }

    pub fn apply_torque(&mut self, handle: BodyHandle, torque: DVec3) -> Result<(), PhysicsError> {
        self.body_mut(handle)?.apply_torque(torque);
        Ok(())
    }

    /// Collects the current sphere contacts without changing any body.
    pub fn collect_contacts(&self) -> Vec<BodyContact> {
        let colliders = self.sphere_colliders();
        let mut contacts = Vec::new();
        for (i, &(first, radius_a)) in colliders.iter().enumerate() {
            for &(second, radius_b) in &colliders[i + 1..] {
                let (Some(a), Some(b)) = (self.bodies.get(first), self.bodies.get(second)) else {
                    continue;
                };
                if let Some(info) =
                    detect_sphere_sphere_collision(a.position, radius_a, b.position, radius_b)
                {
                    contacts.push(BodyContact {
                        first,
                        second,
                        info,
                    });
                }
            }
        }
        contacts
    }

    /// Runs exactly one fixed step of `config.time_step`.
    pub fn step(&mut self) {
        let start = Instant::now();
        self.profile.reset();
        self.profile.body_count = self.bodies.len();

        let substeps = self.config.substeps.max(1);
        let dt = self.config.time_step / f64::from(substeps);

        for substep in 0..substeps {
            let keep_accumulators = substep + 1 < substeps;
            {
                let _timer = ScopedTimer::new("world::integrate", &mut self.profile.integration_time);
                integrate_all(
                    &mut self.bodies,
                    dt,
                    &self.config.integration,
                    self.config.parallel,
                    keep_accumulators,
                );
            }

            let mut collision_time = Duration::ZERO;
            {
                let _timer = ScopedTimer::new("world::collide", &mut collision_time);
                self.resolve_contacts();
            }
            self.profile.collision_time += collision_time;
        }

        self.time += self.config.time_step;
        self.profile.total_time = start.elapsed();
        self.profile.report();
        warn_if_frame_budget_exceeded(self.profile.total_time, self.config.frame_budget_ms);
    }

    /// Feeds `frame_time` into the fixed-step accumulator and runs as many
    /// whole steps as fit. Returns the number of steps taken; the remainder
    /// carries over to the next call.
    pub fn advance(&mut self, frame_time: f64) -> usize {
        if !(frame_time.is_finite() && frame_time > 0.0) {
            return 0;
        }

        self.time_accumulated += frame_time;
        let mut steps = 0;
        while self.time_accumulated >= self.config.time_step {
            self.time_accumulated -= self.config.time_step;
            self.step();
            steps += 1;
        }
        if steps > 1 {
            debug!("advanced {steps} fixed steps for a {frame_time:.4} s frame");
        }
        steps
    }

    fn sphere_colliders(&self) -> Vec<(BodyHandle, f64)> {
        self.bodies
            .iter()
            .filter_map(|(handle, _)| self.sphere_radii.get(&handle).map(|&r| (handle, r)))
            .collect()
    }

    fn resolve_contacts(&mut self) {
        let colliders = self.sphere_colliders();
        for (i, &(first, radius_a)) in colliders.iter().enumerate() {
            for &(second, radius_b) in &colliders[i + 1..] {
                let Some((a, b)) = self.bodies.get_pair_mut(first, second) else {
                    continue;
                };
                let Some(info) =
                    detect_sphere_sphere_collision(a.position, radius_a, b.position, radius_b)
                else {
                    continue;
                };

                self.profile.contact_count += 1;
                if resolve_collision_with(a, b, &info, &self.config.contact) {
                    self.profile.resolved_count += 1;
                }
            }
        }
    }
}

fn check_radius(radius: f64) -> Result<(), PhysicsError> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::InvalidRadius(radius))
    }
}

fn integrate_body(
    body: &mut RigidBodyState,
    dt: f64,
    settings: &IntegrationSettings,
    keep_accumulators: bool,
) {
    let (force, torque) = (body.force, body.torque);
    integrate_rigid_body_with(body, dt, settings);
    if keep_accumulators {
        body.force = force;
        body.torque = torque;
    }
}

#[cfg(feature = "parallel")]
fn integrate_all(
    bodies: &mut Arena<RigidBodyState>,
    dt: f64,
    settings: &IntegrationSettings,
    parallel: bool,
    keep_accumulators: bool,
) {
    if parallel {
        bodies.par_for_each_mut(|body| integrate_body(body, dt, settings, keep_accumulators));
    } else {
        for body in bodies.values_mut() {
            integrate_body(body, dt, settings, keep_accumulators);
        }
    }
}

#[cfg(not(feature = "parallel"))]
fn integrate_all(
    bodies: &mut Arena<RigidBodyState>,
    dt: f64,
    settings: &IntegrationSettings,
    _parallel: bool,
    keep_accumulators: bool,
) {
    for body in bodies.values_mut() {
        integrate_body(body, dt, settings, keep_accumulators);
    }
}
