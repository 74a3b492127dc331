//! Body definitions and opaque body references

use cinder_math::Vec2;
use rapier2d::prelude as rapier;
use serde::{Deserialize, Serialize};

/// Opaque reference to a body owned by a [`PhysicsBackend`](crate::backend::PhysicsBackend).
///
/// References are generational: once the backend destroys a body, a stale
/// reference never resolves to a newer body occupying the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyRef {
    index: u32,
    generation: u32,
}

impl BodyRef {
    /// Create from raw parts
    pub const fn from_raw_parts(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Split into raw parts
    pub const fn into_raw_parts(self) -> (u32, u32) {
        (self.index, self.generation)
    }

    pub(crate) fn from_rapier(handle: rapier::RigidBodyHandle) -> Self {
        let (index, generation) = handle.into_raw_parts();
        Self { index, generation }
    }

    pub(crate) fn to_rapier(self) -> rapier::RigidBodyHandle {
        rapier::RigidBodyHandle::from_raw_parts(self.index, self.generation)
    }
}

/// Type of rigid body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BodyType {
    /// Never moves, infinite mass
    #[default]
    Static,
    /// Moved by velocity only, unaffected by forces
    Kinematic,
    /// Fully simulated
    Dynamic,
}

impl BodyType {
    /// Numeric id exposed to scripts
    pub fn id(self) -> i64 {
        match self {
            Self::Static => 0,
            Self::Kinematic => 1,
            Self::Dynamic => 2,
        }
    }

    /// Inverse of [`BodyType::id`]
    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            0 => Some(Self::Static),
            1 => Some(Self::Kinematic),
            2 => Some(Self::Dynamic),
            _ => None,
        }
    }
}

impl From<BodyType> for rapier::RigidBodyType {
    fn from(t: BodyType) -> Self {
        match t {
            BodyType::Static => rapier::RigidBodyType::Fixed,
            BodyType::Kinematic => rapier::RigidBodyType::KinematicVelocityBased,
            BodyType::Dynamic => rapier::RigidBodyType::Dynamic,
        }
    }
}

/// Description for creating a body, in simulation units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyDef {
    /// Type of body
    pub body_type: BodyType,
    /// Initial position
    pub position: Vec2,
    /// Initial angle (radians)
    pub angle: f32,
    /// Initial linear velocity
    pub linear_velocity: Vec2,
    /// Initial angular velocity (radians per second)
    pub angular_velocity: f32,
    /// Gravity scale (0 = no gravity, 1 = normal)
    pub gravity_scale: f32,
    /// Linear damping
    pub linear_damping: f32,
    /// Angular damping
    pub angular_damping: f32,
    /// Prevent the body from rotating
    pub fixed_rotation: bool,
    /// Continuous collision detection for fast movers
    pub bullet: bool,
    /// Can this body sleep when inactive
    pub allow_sleep: bool,
}

impl Default for BodyDef {
    fn default() -> Self {
        Self {
            body_type: BodyType::Static,
            position: Vec2::ZERO,
            angle: 0.0,
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            gravity_scale: 1.0,
            linear_damping: 0.0,
            angular_damping: 0.0,
            fixed_rotation: false,
            bullet: false,
            allow_sleep: true,
        }
    }
}

impl BodyDef {
    /// Dynamic body description
    pub fn dynamic() -> Self {
        Self {
            body_type: BodyType::Dynamic,
            ..Default::default()
        }
    }

    /// Static body description
    pub fn fixed() -> Self {
        Self::default()
    }

    /// Kinematic body description
    pub fn kinematic() -> Self {
        Self {
            body_type: BodyType::Kinematic,
            ..Default::default()
        }
    }

    /// Set position (simulation units)
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Set angle
    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    /// Set gravity scale
    pub fn with_gravity_scale(mut self, scale: f32) -> Self {
        self.gravity_scale = scale;
        self
    }

    /// Lock rotation
    pub fn with_fixed_rotation(mut self, fixed: bool) -> Self {
        self.fixed_rotation = fixed;
        self
    }

    /// Build a Rapier rigid body builder
    pub(crate) fn to_rapier_builder(&self) -> rapier::RigidBodyBuilder {
        let mut builder = rapier::RigidBodyBuilder::new(self.body_type.into())
            .translation(rapier::Vector::new(self.position.x, self.position.y))
            .rotation(self.angle)
            .linvel(rapier::Vector::new(
                self.linear_velocity.x,
                self.linear_velocity.y,
            ))
            .angvel(self.angular_velocity)
            .gravity_scale(self.gravity_scale)
            .linear_damping(self.linear_damping)
            .angular_damping(self.angular_damping)
            .ccd_enabled(self.bullet)
            .can_sleep(self.allow_sleep);

        if self.fixed_rotation {
            builder = builder.lock_rotations();
        }

        builder
    }
}
