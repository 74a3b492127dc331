//! Recording backend for tests.
//!
//! Keeps just enough body state to answer transform/velocity queries and logs
//! every call so tests can assert on exactly what reached the engine.

use crate::backend::PhysicsBackend;
use crate::body::{BodyDef, BodyRef};
use crate::error::{PhysicsError, Result};
use crate::fixture::{FixtureDef, FixtureRef};
use cinder_math::{Transform2D, Vec2};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// One call received by the backend
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    CreateBody(BodyRef),
    DestroyBody(BodyRef),
    CreateFixture { body: BodyRef, def: FixtureDef },
    ApplyForce { body: BodyRef, force: Vec2, point: Option<Vec2> },
    ApplyImpulse { body: BodyRef, impulse: Vec2, point: Option<Vec2> },
    SetTransform { body: BodyRef, position: Vec2, angle: f32 },
    SetLinearVelocity { body: BodyRef, velocity: Vec2 },
    SetGravityScale { body: BodyRef, scale: f32 },
    Step(f32),
}

/// Shared view of the call log, usable after the backend is boxed into a space
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<BackendCall>>>);

impl CallLog {
    pub fn calls(&self) -> Vec<BackendCall> {
        self.0.lock().clone()
    }

    pub fn count(&self, pred: impl Fn(&BackendCall) -> bool) -> usize {
        self.0.lock().iter().filter(|c| pred(c)).count()
    }

    pub fn clear(&self) {
        self.0.lock().clear();
    }

    fn push(&self, call: BackendCall) {
        self.0.lock().push(call);
    }
}

#[derive(Debug, Clone)]
struct MockBody {
    position: Vec2,
    angle: f32,
    velocity: Vec2,
    gravity_scale: f32,
    fixtures: u32,
}

/// In-memory [`PhysicsBackend`] that records calls
#[derive(Debug, Default)]
pub struct RecordingBackend {
    log: CallLog,
    bodies: HashMap<BodyRef, MockBody>,
    next_index: u32,
    next_fixture: u32,
    body_budget: Option<usize>,
    fail_fixtures: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the call log
    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    /// Count calls matching a predicate
    pub fn count(&self, pred: impl Fn(&BackendCall) -> bool) -> usize {
        self.log.count(pred)
    }

    /// Allow only `budget` more body allocations; later ones fail
    pub fn with_body_budget(mut self, budget: usize) -> Self {
        self.body_budget = Some(budget);
        self
    }

    /// Make every fixture allocation fail
    pub fn with_failing_fixtures(mut self) -> Self {
        self.fail_fixtures = true;
        self
    }

    fn get(&self, body: BodyRef) -> Result<&MockBody> {
        self.bodies.get(&body).ok_or(PhysicsError::BodyNotFound(body))
    }

    fn get_mut(&mut self, body: BodyRef) -> Result<&mut MockBody> {
        self.bodies.get_mut(&body).ok_or(PhysicsError::BodyNotFound(body))
    }
}

impl PhysicsBackend for RecordingBackend {
    fn name(&self) -> &str {
        "recording"
    }

    fn create_body(&mut self, def: &BodyDef) -> Result<BodyRef> {
        match self.body_budget.as_mut() {
            Some(0) => {
                return Err(PhysicsError::AllocationFailure("recording backend refused body".into()))
            }
            Some(n) => *n -= 1,
            None => {}
        }
        let body = BodyRef::from_raw_parts(self.next_index, 0);
        self.next_index += 1;
        self.bodies.insert(
            body,
            MockBody {
                position: def.position,
                angle: def.angle,
                velocity: def.linear_velocity,
                gravity_scale: def.gravity_scale,
                fixtures: 0,
            },
        );
        self.log.push(BackendCall::CreateBody(body));
        Ok(body)
    }

    fn destroy_body(&mut self, body: BodyRef) -> Result<()> {
        self.bodies.remove(&body).ok_or(PhysicsError::BodyNotFound(body))?;
        self.log.push(BackendCall::DestroyBody(body));
        Ok(())
    }

    fn create_fixture(&mut self, body: BodyRef, def: &FixtureDef) -> Result<FixtureRef> {
        if def.shape.is_none() {
            return Err(PhysicsError::MissingShape);
        }
        if self.fail_fixtures {
            return Err(PhysicsError::AllocationFailure("recording backend refused fixture".into()));
        }
        self.get_mut(body)?.fixtures += 1;
        let fixture = FixtureRef::from_raw_parts(self.next_fixture, 0);
        self.next_fixture += 1;
        self.log.push(BackendCall::CreateFixture { body, def: def.clone() });
        Ok(fixture)
    }

    fn apply_force(&mut self, body: BodyRef, force: Vec2, point: Option<Vec2>, _wake: bool) -> Result<()> {
        self.get(body)?;
        self.log.push(BackendCall::ApplyForce { body, force, point });
        Ok(())
    }

    fn apply_impulse(&mut self, body: BodyRef, impulse: Vec2, point: Option<Vec2>, _wake: bool) -> Result<()> {
        self.get_mut(body)?.velocity += impulse;
        self.log.push(BackendCall::ApplyImpulse { body, impulse, point });
        Ok(())
    }

    fn world_point(&self, body: BodyRef, local: Vec2) -> Result<Vec2> {
        let b = self.get(body)?;
        Ok(Transform2D::new(b.position, b.angle).transform_point(local))
    }

    fn transform(&self, body: BodyRef) -> Result<(Vec2, f32)> {
        let b = self.get(body)?;
        Ok((b.position, b.angle))
    }

    fn set_transform(&mut self, body: BodyRef, position: Vec2, angle: f32) -> Result<()> {
        let b = self.get_mut(body)?;
        b.position = position;
        b.angle = angle;
        self.log.push(BackendCall::SetTransform { body, position, angle });
        Ok(())
    }

    fn linear_velocity(&self, body: BodyRef) -> Result<Vec2> {
        Ok(self.get(body)?.velocity)
    }

    fn set_linear_velocity(&mut self, body: BodyRef, velocity: Vec2) -> Result<()> {
        self.get_mut(body)?.velocity = velocity;
        self.log.push(BackendCall::SetLinearVelocity { body, velocity });
        Ok(())
    }

    fn gravity_scale(&self, body: BodyRef) -> Result<f32> {
        Ok(self.get(body)?.gravity_scale)
    }

    fn set_gravity_scale(&mut self, body: BodyRef, scale: f32) -> Result<()> {
        self.get_mut(body)?.gravity_scale = scale;
        self.log.push(BackendCall::SetGravityScale { body, scale });
        Ok(())
    }

    fn step(&mut self, dt: f32) {
        for b in self.bodies.values_mut() {
            b.position += b.velocity * dt;
        }
        self.log.push(BackendCall::Step(dt));
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }
}
