//! Engine-agnostic physics backend trait.
//!
//! Everything below this trait speaks simulation units. The backend is the
//! allocator of record for bodies: it creates them, and it is the only thing
//! that destroys them, always on behalf of
//! [`PhysicsSpace::drain_disposals`](crate::space::PhysicsSpace::drain_disposals).

use crate::body::{BodyDef, BodyRef};
use crate::error::Result;
use crate::fixture::{FixtureDef, FixtureRef};
use cinder_math::Vec2;

/// Trait that concrete physics engines must implement.
pub trait PhysicsBackend: Send + Sync + 'static {
    /// Human-readable engine name (e.g., "rapier2d").
    fn name(&self) -> &str;

    /// Allocate a body
    fn create_body(&mut self, def: &BodyDef) -> Result<BodyRef>;

    /// Destroy a body and every fixture attached to it
    fn destroy_body(&mut self, body: BodyRef) -> Result<()>;

    /// Attach a fixture to a body
    fn create_fixture(&mut self, body: BodyRef, def: &FixtureDef) -> Result<FixtureRef>;

    /// Apply a force at a world point, or at the centre of mass when `point` is `None`
    fn apply_force(&mut self, body: BodyRef, force: Vec2, point: Option<Vec2>, wake: bool) -> Result<()>;

    /// Apply a linear impulse at a world point, or at the centre of mass when `point` is `None`
    fn apply_impulse(&mut self, body: BodyRef, impulse: Vec2, point: Option<Vec2>, wake: bool) -> Result<()>;

    /// Map a body-local point to a world point
    fn world_point(&self, body: BodyRef, local: Vec2) -> Result<Vec2>;

    /// Current position and angle
    fn transform(&self, body: BodyRef) -> Result<(Vec2, f32)>;

    /// Teleport the body
    fn set_transform(&mut self, body: BodyRef, position: Vec2, angle: f32) -> Result<()>;

    fn linear_velocity(&self, body: BodyRef) -> Result<Vec2>;

    fn set_linear_velocity(&mut self, body: BodyRef, velocity: Vec2) -> Result<()>;

    fn gravity_scale(&self, body: BodyRef) -> Result<f32>;

    fn set_gravity_scale(&mut self, body: BodyRef, scale: f32) -> Result<()>;

    /// Advance the simulation by one fixed step
    fn step(&mut self, dt: f32);

    /// Number of live bodies
    fn body_count(&self) -> usize;
}
