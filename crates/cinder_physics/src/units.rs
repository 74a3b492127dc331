//! Conversion between world (render) units and simulation units
//!
//! The physics engine is tuned for objects in the 0.1–10 unit range, while
//! world space is usually measured in pixels. A single scale factor bridges
//! the two:
//!
//! - positional quantities (positions, offsets, lengths, forces, impulses)
//!   are multiplied by the scale on the way in and divided on the way out;
//! - material quantities (density, friction, restitution) go the other way,
//!   divided on the way in and multiplied on the way out.
//!
//! Both directions must use the same rule or values drift on every
//! read-modify-write from a script.

use crate::error::{PhysicsError, Result};
use cinder_math::{Transform2D, Vec2};

/// Default scale: 32 world units (pixels) per simulation unit
pub const DEFAULT_SCALE: f32 = 1.0 / 32.0;

/// Bidirectional world/simulation unit converter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitConverter {
    scale: f32,
}

impl UnitConverter {
    /// Create a converter; the scale must be positive and finite
    pub fn new(scale: f32) -> Result<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(PhysicsError::InvalidConfig(format!(
                "unit scale must be positive and finite, got {scale}"
            )));
        }
        Ok(Self { scale })
    }

    /// The fixed scale factor
    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// World vector → simulation vector
    #[inline]
    pub fn to_simulation(&self, world: Vec2) -> Vec2 {
        world * self.scale
    }

    /// Simulation vector → world vector
    #[inline]
    pub fn to_world(&self, sim: Vec2) -> Vec2 {
        sim / self.scale
    }

    /// World length → simulation length
    #[inline]
    pub fn length_to_simulation(&self, world: f32) -> f32 {
        world * self.scale
    }

    /// Density, friction or restitution: world → simulation
    #[inline]
    pub fn material_to_simulation(&self, world: f32) -> f32 {
        world / self.scale
    }

    /// Density, friction or restitution: simulation → world
    #[inline]
    pub fn material_to_world(&self, sim: f32) -> f32 {
        sim * self.scale
    }

    /// Simulation transform → world transform. Angles are unit-free.
    #[inline]
    pub fn transform_to_world(&self, position: Vec2, angle: f32) -> Transform2D {
        Transform2D::new(self.to_world(position), angle)
    }
}

impl Default for UnitConverter {
    fn default() -> Self {
        Self { scale: DEFAULT_SCALE }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_vector_round_trip() {
        let units = UnitConverter::default();
        for v in [
            Vec2::new(0.0, 0.0),
            Vec2::new(640.0, -480.0),
            Vec2::new(-0.125, 1e4),
            Vec2::new(3.3, 7.7),
        ] {
            let back = units.to_world(units.to_simulation(v));
            assert_relative_eq!(back.x, v.x, max_relative = 1e-6);
            assert_relative_eq!(back.y, v.y, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_material_round_trip_for_any_scale() {
        for scale in [0.01, 1.0 / 32.0, 1.0, 50.0] {
            let units = UnitConverter::new(scale).unwrap();
            for d in [0.0, 0.2, 1.0, 7.8, 1000.0] {
                let back = units.material_to_world(units.material_to_simulation(d));
                assert_relative_eq!(back, d, max_relative = 1e-6);
            }
        }
    }

    #[test]
    fn test_material_uses_inverse_sense() {
        let units = UnitConverter::new(0.5).unwrap();
        assert_relative_eq!(units.to_simulation(Vec2::new(4.0, 0.0)).x, 2.0);
        assert_relative_eq!(units.material_to_simulation(4.0), 8.0);
        assert_relative_eq!(units.material_to_world(8.0), 4.0);
    }

    #[test]
    fn test_rejects_bad_scale() {
        assert!(UnitConverter::new(0.0).is_err());
        assert!(UnitConverter::new(-1.0).is_err());
        assert!(UnitConverter::new(f32::NAN).is_err());
        assert!(UnitConverter::new(f32::INFINITY).is_err());
    }
}
