//! 2D transform: position plus rotation about the Z axis

use crate::vector::Vec2;

/// Position and rotation (radians, counter-clockwise) of a 2D object
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform2D {
    pub position: Vec2,
    pub rotation: f32,
}

impl Transform2D {
    /// Identity transform
    pub const IDENTITY: Self = Self {
        position: Vec2::ZERO,
        rotation: 0.0,
    };

    /// Create a new transform
    #[inline]
    pub const fn new(position: Vec2, rotation: f32) -> Self {
        Self { position, rotation }
    }

    /// Create from position only
    #[inline]
    pub const fn from_position(position: Vec2) -> Self {
        Self { position, rotation: 0.0 }
    }

    /// Map a point from local space into the space this transform lives in
    #[inline]
    pub fn transform_point(&self, point: Vec2) -> Vec2 {
        self.position + point.rotate(self.rotation)
    }

    /// Interpolate between two transforms.
    ///
    /// Rotation takes the shortest arc so a body crossing the ±π seam does
    /// not spin the long way round.
    pub fn lerp(&self, other: &Transform2D, t: f32) -> Self {
        let tau = core::f32::consts::TAU;
        let mut delta = (other.rotation - self.rotation) % tau;
        if delta > core::f32::consts::PI {
            delta -= tau;
        } else if delta < -core::f32::consts::PI {
            delta += tau;
        }
        Self {
            position: self.position.lerp(other.position, t),
            rotation: self.rotation + delta * t,
        }
    }
}
