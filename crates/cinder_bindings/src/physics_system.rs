//! Physics system: owns the step loop
//!
//! Each update runs, in order:
//!
//! 1. drain the disposal list (safe point, nothing is mid-step)
//! 2. advance the space by fixed substeps
//! 3. copy every live body's transform into its entity's Transform

use cinder_math::Transform2D;
use cinder_physics::{BodyState, RigidBody, SharedSpace};

use crate::shared::Shared;
use crate::transform::Transform;

/// What one update did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhysicsStepReport {
    /// Bodies destroyed from the disposal list
    pub disposed: usize,
    /// Fixed substeps run
    pub substeps: u32,
    /// Transforms written back
    pub synced: usize,
}

/// Drives a [`SharedSpace`] from the frame loop
pub struct PhysicsSystem {
    space: SharedSpace,
    last_report: PhysicsStepReport,
}

impl PhysicsSystem {
    pub fn new(space: SharedSpace) -> Self {
        Self {
            space,
            last_report: PhysicsStepReport::default(),
        }
    }

    pub fn space(&self) -> &SharedSpace {
        &self.space
    }

    /// Drain, step and sync.
    ///
    /// The space lock is released after stepping and retaken per body while
    /// that body's component lock is held: component first, then space.
    pub fn update(&mut self, world: &hecs::World, delta_time: f32) -> PhysicsStepReport {
        let (disposed, substeps) = {
            let mut space = self.space.lock();
            let disposed = space.drain_disposals().len();
            (disposed, space.step(delta_time))
        };

        let mut synced = 0;
        let mut query = world.query::<(&Shared<RigidBody>, &Shared<Transform>)>();
        for (entity, (rigid_body, transform)) in query.iter() {
            let mut rigid_body = rigid_body.write();
            if rigid_body.state() != BodyState::Active {
                continue;
            }
            let reconciled = rigid_body.reconcile(&self.space.lock());
            match reconciled {
                Ok(t) => {
                    *transform.write() = Transform::from(t);
                    synced += 1;
                }
                Err(e) => log::warn!("Could not sync {:?}: {}", entity, e),
            }
        }

        self.last_report = PhysicsStepReport {
            disposed,
            substeps,
            synced,
        };
        self.last_report
    }

    pub fn last_report(&self) -> PhysicsStepReport {
        self.last_report
    }

    /// Fraction of a fixed step left over, for render interpolation
    pub fn interpolation_alpha(&self) -> f32 {
        self.space.lock().interpolation_alpha()
    }

    /// Render transform for a body between its last sync and `target`
    pub fn interpolate(&self, rigid_body: &RigidBody, target: &Transform2D) -> Transform2D {
        rigid_body.sync().interpolate(target, self.interpolation_alpha())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cinder_math::Vec2;
    use cinder_physics::testing::{BackendCall, RecordingBackend};
    use cinder_physics::{PhysicsConfig, PhysicsSpace};

    fn system() -> (PhysicsSystem, cinder_physics::testing::CallLog) {
        let backend = RecordingBackend::new();
        let log = backend.log();
        let space = PhysicsSpace::new(PhysicsConfig::default().with_scale(0.5), Box::new(backend))
            .unwrap()
            .into_shared();
        (PhysicsSystem::new(space), log)
    }

    #[test]
    fn test_drain_happens_before_step() {
        let (mut system, log) = system();
        let world = hecs::World::new();
        let mut rb = RigidBody::spawn(&mut system.space().lock()).unwrap();
        rb.dispose(&mut system.space().lock()).unwrap();

        let report = system.update(&world, 1.0 / 60.0);

        assert_eq!(report.disposed, 1);
        assert_eq!(report.substeps, 1);
        let calls = log.calls();
        let destroy = calls.iter().position(|c| matches!(c, BackendCall::DestroyBody(_))).unwrap();
        let step = calls.iter().position(|c| matches!(c, BackendCall::Step(_))).unwrap();
        assert!(destroy < step);
    }

    #[test]
    fn test_syncs_transform_in_world_units() {
        let (mut system, _) = system();
        let mut world = hecs::World::new();

        let mut rb = RigidBody::spawn(&mut system.space().lock()).unwrap();
        rb.warp_to(&mut system.space().lock(), Vec2::new(8.0, 6.0)).unwrap();
        let entity = world.spawn((Shared::new(rb), Shared::new(Transform::default())));
        let orphan = world.spawn((Shared::new(RigidBody::new()), Shared::new(Transform::new(1.0, 1.0, 0.0))));

        let report = system.update(&world, 0.0);

        assert_eq!(report.synced, 1);
        let t = *world.get::<&Shared<Transform>>(entity).unwrap().read();
        assert_relative_eq!(t.position.x, 8.0);
        assert_relative_eq!(t.position.y, 6.0);
        assert!(!world.get::<&Shared<RigidBody>>(entity).unwrap().read().is_dirty());
        let untouched = *world.get::<&Shared<Transform>>(orphan).unwrap().read();
        assert_eq!(untouched, Transform::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_interpolate_snaps_while_dirty() {
        let (system, _) = system();
        let rb = RigidBody::spawn(&mut system.space().lock()).unwrap();
        let target = Transform2D::from_position(Vec2::new(3.0, 3.0));

        assert_eq!(system.interpolate(&rb, &target), target);
    }
}
