//! Rigid body component
//!
//! A [`RigidBody`] is the game-facing handle to at most one live physics
//! body. It never destroys a body itself: replaced and released bodies go to
//! the space's disposal list and are destroyed when the step loop drains it.
//!
//! ```text
//! Uninitialized --create--> Active --instantiate--> Active
//!       |                     |
//!       +------dispose--------+--dispose--> Disposed
//! ```
//!
//! All vectors taken by this module are in world units.

use crate::body::{BodyDef, BodyRef};
use crate::error::{PhysicsError, Result};
use crate::fixture::{FixtureDef, FixtureRef};
use crate::space::PhysicsSpace;
use crate::sync::SyncState;
use cinder_math::{Transform2D, Vec2};

/// Lifecycle state of a [`RigidBody`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyState {
    /// No body has been created yet
    #[default]
    Uninitialized,
    /// Owns a live body
    Active,
    /// Released; every further operation fails
    Disposed,
}

/// Game-facing rigid body handle. Owns its body exclusively, so it is not
/// `Clone`.
#[derive(Debug, Default)]
pub struct RigidBody {
    state: BodyState,
    body: Option<BodyRef>,
    sync: SyncState,
}

impl RigidBody {
    /// Create an uninitialized handle
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handle and a body from the space's default definition
    pub fn spawn(space: &mut PhysicsSpace) -> Result<Self> {
        let def = space.default_body_def().clone();
        let mut rigid_body = Self::new();
        rigid_body.create(space, &def)?;
        Ok(rigid_body)
    }

    pub fn state(&self) -> BodyState {
        self.state
    }

    /// The live body, if any
    pub fn body(&self) -> Option<BodyRef> {
        self.body
    }

    pub fn sync(&self) -> &SyncState {
        &self.sync
    }

    fn active_body(&self, operation: &'static str) -> Result<BodyRef> {
        match (self.state, self.body) {
            (BodyState::Active, Some(body)) => Ok(body),
            _ => {
                log::warn!("Rejected {} on rigid body in state {:?}", operation, self.state);
                Err(PhysicsError::InvalidState {
                    operation,
                    state: self.state,
                })
            }
        }
    }

    // ==================== Lifecycle ====================

    /// Allocate the first body
    pub fn create(&mut self, space: &mut PhysicsSpace, def: &BodyDef) -> Result<()> {
        if self.state != BodyState::Uninitialized {
            return Err(PhysicsError::InvalidState {
                operation: "create",
                state: self.state,
            });
        }
        let body = space.backend_mut().create_body(def)?;
        self.body = Some(body);
        self.state = BodyState::Active;
        self.sync.mark_dirty();
        log::trace!("Created {:?}", body);
        Ok(())
    }

    /// Replace the current body with one built from `def`.
    ///
    /// The new body is allocated before the old one is queued, so a failed
    /// allocation leaves the handle untouched. If the old body cannot be
    /// queued the new one is destroyed again and the handle keeps the old one.
    pub fn instantiate(&mut self, space: &mut PhysicsSpace, def: &BodyDef) -> Result<()> {
        let old = self.active_body("instantiate")?;
        let body = space.backend_mut().create_body(def)?;
        if let Err(e) = space.queue_disposal(old) {
            log::error!("Failed to queue replaced body {:?}: {}", old, e);
            space.backend_mut().destroy_body(body)?;
            return Err(e);
        }
        self.body = Some(body);
        self.sync.mark_dirty();
        log::trace!("Replaced {:?} with {:?}", old, body);
        Ok(())
    }

    /// Attach a fixture to the current body
    pub fn add_fixture(&mut self, space: &mut PhysicsSpace, def: &FixtureDef) -> Result<FixtureRef> {
        let body = self.active_body("add a fixture to")?;
        space.backend_mut().create_fixture(body, def)
    }

    /// Release the body. Fails if already disposed.
    pub fn dispose(&mut self, space: &mut PhysicsSpace) -> Result<()> {
        if self.state == BodyState::Disposed {
            log::warn!("Rejected dispose on rigid body in state {:?}", self.state);
            return Err(PhysicsError::InvalidState {
                operation: "dispose",
                state: self.state,
            });
        }
        if let Some(body) = self.body.take() {
            space.queue_disposal(body)?;
        }
        self.state = BodyState::Disposed;
        Ok(())
    }

    // ==================== Forces ====================

    /// Apply a force at a world location
    pub fn apply_force(&mut self, space: &mut PhysicsSpace, force: Vec2, location: Vec2) -> Result<()> {
        let body = self.active_body("apply a force to")?;
        let units = *space.units();
        space.backend_mut().apply_force(
            body,
            units.to_simulation(force),
            Some(units.to_simulation(location)),
            true,
        )
    }

    /// Apply a force at a point given relative to the body
    pub fn apply_force_rel(&mut self, space: &mut PhysicsSpace, force: Vec2, rel_pos: Vec2) -> Result<()> {
        let body = self.active_body("apply a force to")?;
        let units = *space.units();
        let point = space.backend().world_point(body, units.to_simulation(rel_pos))?;
        space
            .backend_mut()
            .apply_force(body, units.to_simulation(force), Some(point), true)
    }

    pub fn apply_force_to_centre(&mut self, space: &mut PhysicsSpace, force: Vec2) -> Result<()> {
        let body = self.active_body("apply a force to")?;
        let force = space.units().to_simulation(force);
        space.backend_mut().apply_force(body, force, None, true)
    }

    // ==================== Impulses ====================

    /// Apply an impulse at a world location
    pub fn apply_impulse(&mut self, space: &mut PhysicsSpace, impulse: Vec2, location: Vec2) -> Result<()> {
        let body = self.active_body("apply an impulse to")?;
        let units = *space.units();
        space.backend_mut().apply_impulse(
            body,
            units.to_simulation(impulse),
            Some(units.to_simulation(location)),
            true,
        )
    }

    pub fn apply_impulse_rel(&mut self, space: &mut PhysicsSpace, impulse: Vec2, rel_pos: Vec2) -> Result<()> {
        let body = self.active_body("apply an impulse to")?;
        let units = *space.units();
        let point = space.backend().world_point(body, units.to_simulation(rel_pos))?;
        space
            .backend_mut()
            .apply_impulse(body, units.to_simulation(impulse), Some(point), true)
    }

    pub fn apply_impulse_to_centre(&mut self, space: &mut PhysicsSpace, impulse: Vec2) -> Result<()> {
        let body = self.active_body("apply an impulse to")?;
        let impulse = space.units().to_simulation(impulse);
        space.backend_mut().apply_impulse(body, impulse, None, true)
    }

    // ==================== Direct state ====================

    /// Teleport to `dest`, keeping the angle and dropping all linear velocity
    pub fn warp_to(&mut self, space: &mut PhysicsSpace, dest: Vec2) -> Result<()> {
        let body = self.active_body("warp")?;
        let position = space.units().to_simulation(dest);
        let backend = space.backend_mut();
        let (_, angle) = backend.transform(body)?;
        backend.set_transform(body, position, angle)?;
        backend.set_linear_velocity(body, Vec2::ZERO)
    }

    pub fn gravity_scale(&self, space: &PhysicsSpace) -> Result<f32> {
        let body = self.active_body("read gravity of")?;
        space.backend().gravity_scale(body)
    }

    pub fn set_gravity_scale(&mut self, space: &mut PhysicsSpace, scale: f32) -> Result<()> {
        let body = self.active_body("set gravity of")?;
        space.backend_mut().set_gravity_scale(body, scale)
    }

    // ==================== Sync ====================

    pub fn is_dirty(&self) -> bool {
        self.sync.is_dirty()
    }

    /// Read the body transform in world units and mark the handle in sync
    pub fn reconcile(&mut self, space: &PhysicsSpace) -> Result<Transform2D> {
        let body = self.active_body("reconcile")?;
        let (position, angle) = space.backend().transform(body)?;
        Ok(self.sync.reconcile(position, angle, space.units()))
    }
}
