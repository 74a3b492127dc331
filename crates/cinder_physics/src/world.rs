//! Rapier 2D backend - the simulation container

use crate::backend::PhysicsBackend;
use crate::body::{BodyDef, BodyRef};
use crate::config::PhysicsConfig;
use crate::error::{PhysicsError, Result};
use crate::fixture::{FixtureDef, FixtureRef};
use crate::units::UnitConverter;
use cinder_math::Vec2;
use rapier2d::prelude as rapier;
use std::num::NonZeroUsize;

/// [`PhysicsBackend`] over the Rapier 2D pipeline
pub struct RapierBackend {
    /// Rapier physics pipeline
    pipeline: rapier::PhysicsPipeline,

    /// Gravity (simulation units)
    gravity: rapier::Vector<f32>,

    /// Integration parameters
    integration_params: rapier::IntegrationParameters,

    /// Island manager
    islands: rapier::IslandManager,

    /// Broad phase
    broad_phase: rapier::DefaultBroadPhase,

    /// Narrow phase
    narrow_phase: rapier::NarrowPhase,

    /// Impulse joint set
    impulse_joints: rapier::ImpulseJointSet,

    /// Multibody joint set
    multibody_joints: rapier::MultibodyJointSet,

    /// CCD solver
    ccd_solver: rapier::CCDSolver,

    /// Query pipeline
    query_pipeline: rapier::QueryPipeline,

    /// Rigid body set
    bodies: rapier::RigidBodySet,

    /// Collider set
    colliders: rapier::ColliderSet,
}

impl RapierBackend {
    /// Create a backend from a configuration; gravity is converted to simulation units
    pub fn new(config: &PhysicsConfig) -> Result<Self> {
        let units = UnitConverter::new(config.scale)?;
        let gravity = units.to_simulation(Vec2::from(config.gravity));

        let mut integration_params = rapier::IntegrationParameters::default();
        integration_params.dt = config.timestep;
        integration_params.num_solver_iterations =
            NonZeroUsize::new(config.velocity_iterations).unwrap_or(NonZeroUsize::MIN);

        Ok(Self {
            pipeline: rapier::PhysicsPipeline::new(),
            gravity: rapier::Vector::new(gravity.x, gravity.y),
            integration_params,
            islands: rapier::IslandManager::new(),
            broad_phase: rapier::DefaultBroadPhase::new(),
            narrow_phase: rapier::NarrowPhase::new(),
            impulse_joints: rapier::ImpulseJointSet::new(),
            multibody_joints: rapier::MultibodyJointSet::new(),
            ccd_solver: rapier::CCDSolver::new(),
            query_pipeline: rapier::QueryPipeline::new(),
            bodies: rapier::RigidBodySet::new(),
            colliders: rapier::ColliderSet::new(),
        })
    }

    /// Gravity in simulation units
    pub fn gravity(&self) -> Vec2 {
        Vec2::new(self.gravity.x, self.gravity.y)
    }

    /// Number of colliders
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    fn body(&self, body: BodyRef) -> Result<&rapier::RigidBody> {
        self.bodies
            .get(body.to_rapier())
            .ok_or(PhysicsError::BodyNotFound(body))
    }

    fn body_mut(&mut self, body: BodyRef) -> Result<&mut rapier::RigidBody> {
        self.bodies
            .get_mut(body.to_rapier())
            .ok_or(PhysicsError::BodyNotFound(body))
    }
}

impl PhysicsBackend for RapierBackend {
    fn name(&self) -> &str {
        "rapier2d"
    }

    fn create_body(&mut self, def: &BodyDef) -> Result<BodyRef> {
        let handle = self.bodies.insert(def.to_rapier_builder());
        Ok(BodyRef::from_rapier(handle))
    }

    fn destroy_body(&mut self, body: BodyRef) -> Result<()> {
        self.bodies
            .remove(
                body.to_rapier(),
                &mut self.islands,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true, // Remove attached colliders
            )
            .map(|_| ())
            .ok_or(PhysicsError::BodyNotFound(body))
    }

    fn create_fixture(&mut self, body: BodyRef, def: &FixtureDef) -> Result<FixtureRef> {
        let builder = def.to_rapier_builder().ok_or(PhysicsError::MissingShape)?;
        if !self.bodies.contains(body.to_rapier()) {
            return Err(PhysicsError::BodyNotFound(body));
        }
        let handle = self
            .colliders
            .insert_with_parent(builder, body.to_rapier(), &mut self.bodies);
        Ok(FixtureRef::from_rapier(handle))
    }

    fn apply_force(&mut self, body: BodyRef, force: Vec2, point: Option<Vec2>, wake: bool) -> Result<()> {
        let b = self.body_mut(body)?;
        let force = rapier::Vector::new(force.x, force.y);
        match point {
            Some(p) => b.add_force_at_point(force, rapier::Point::new(p.x, p.y), wake),
            None => b.add_force(force, wake),
        }
        Ok(())
    }

    fn apply_impulse(&mut self, body: BodyRef, impulse: Vec2, point: Option<Vec2>, wake: bool) -> Result<()> {
        let b = self.body_mut(body)?;
        let impulse = rapier::Vector::new(impulse.x, impulse.y);
        match point {
            Some(p) => b.apply_impulse_at_point(impulse, rapier::Point::new(p.x, p.y), wake),
            None => b.apply_impulse(impulse, wake),
        }
        Ok(())
    }

    fn world_point(&self, body: BodyRef, local: Vec2) -> Result<Vec2> {
        let b = self.body(body)?;
        let p = b.position().transform_point(&rapier::Point::new(local.x, local.y));
        Ok(Vec2::new(p.x, p.y))
    }

    fn transform(&self, body: BodyRef) -> Result<(Vec2, f32)> {
        let b = self.body(body)?;
        let pos = b.translation();
        Ok((Vec2::new(pos.x, pos.y), b.rotation().angle()))
    }

    fn set_transform(&mut self, body: BodyRef, position: Vec2, angle: f32) -> Result<()> {
        let b = self.body_mut(body)?;
        b.set_position(
            rapier::Isometry::new(rapier::Vector::new(position.x, position.y), angle),
            true,
        );
        Ok(())
    }

    fn linear_velocity(&self, body: BodyRef) -> Result<Vec2> {
        let vel = self.body(body)?.linvel();
        Ok(Vec2::new(vel.x, vel.y))
    }

    fn set_linear_velocity(&mut self, body: BodyRef, velocity: Vec2) -> Result<()> {
        self.body_mut(body)?
            .set_linvel(rapier::Vector::new(velocity.x, velocity.y), true);
        Ok(())
    }

    fn gravity_scale(&self, body: BodyRef) -> Result<f32> {
        Ok(self.body(body)?.gravity_scale())
    }

    fn set_gravity_scale(&mut self, body: BodyRef, scale: f32) -> Result<()> {
        self.body_mut(body)?.set_gravity_scale(scale, true);
        Ok(())
    }

    fn step(&mut self, dt: f32) {
        self.integration_params.dt = dt;
        self.pipeline.step(
            &self.gravity,
            &self.integration_params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }
}
