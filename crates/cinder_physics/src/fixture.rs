//! Fixture definitions: shape plus material attached to a body

use crate::shape::ShapeDesc;
use crate::units::UnitConverter;
use rapier2d::prelude as rapier;
use serde::{Deserialize, Serialize};

/// Handle to a fixture created by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixtureRef {
    index: u32,
    generation: u32,
}

impl FixtureRef {
    /// Create from raw parts
    pub const fn from_raw_parts(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Split into raw parts
    pub const fn into_raw_parts(self) -> (u32, u32) {
        (self.index, self.generation)
    }

    pub(crate) fn from_rapier(handle: rapier::ColliderHandle) -> Self {
        let (index, generation) = handle.into_raw_parts();
        Self { index, generation }
    }
}

/// Geometry and material for a fixture.
///
/// The material fields are stored in simulation units. Scripts read and write
/// them through the `*_world` accessors, which apply the material rule of
/// [`UnitConverter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureDef {
    /// Collision shape; a fixture cannot be attached without one
    pub shape: Option<ShapeDesc>,
    /// Density for mass calculation
    pub density: f32,
    /// Friction coefficient
    pub friction: f32,
    /// Restitution (bounciness)
    pub restitution: f32,
    /// Sensor fixtures report overlaps but produce no contact response
    pub is_sensor: bool,
}

impl Default for FixtureDef {
    fn default() -> Self {
        Self {
            shape: None,
            density: 0.0,
            friction: 0.2,
            restitution: 0.0,
            is_sensor: false,
        }
    }
}

impl FixtureDef {
    /// Fixture with a shape and default material
    pub fn new(shape: ShapeDesc) -> Self {
        Self {
            shape: Some(shape),
            ..Default::default()
        }
    }

    /// Set shape
    pub fn with_shape(mut self, shape: ShapeDesc) -> Self {
        self.shape = Some(shape);
        self
    }

    /// Set density (simulation units)
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    /// Set friction (simulation units)
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    /// Set restitution (simulation units)
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn density_world(&self, units: &UnitConverter) -> f32 {
        units.material_to_world(self.density)
    }

    pub fn set_density_world(&mut self, units: &UnitConverter, density: f32) {
        self.density = units.material_to_simulation(density);
    }

    pub fn friction_world(&self, units: &UnitConverter) -> f32 {
        units.material_to_world(self.friction)
    }

    pub fn set_friction_world(&mut self, units: &UnitConverter, friction: f32) {
        self.friction = units.material_to_simulation(friction);
    }

    pub fn restitution_world(&self, units: &UnitConverter) -> f32 {
        units.material_to_world(self.restitution)
    }

    pub fn set_restitution_world(&mut self, units: &UnitConverter, restitution: f32) {
        self.restitution = units.material_to_simulation(restitution);
    }

    /// Build a Rapier collider builder; `None` when the shape is missing
    pub(crate) fn to_rapier_builder(&self) -> Option<rapier::ColliderBuilder> {
        let (shape, offset) = self.shape?.to_rapier();
        Some(
            rapier::ColliderBuilder::new(shape)
                .translation(offset)
                .density(self.density)
                .friction(self.friction)
                .restitution(self.restitution)
                .sensor(self.is_sensor),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_world_accessors_round_trip() {
        let units = UnitConverter::new(0.25).unwrap();
        let mut def = FixtureDef::default();

        def.set_density_world(&units, 1.5);
        def.set_friction_world(&units, 0.3);
        def.set_restitution_world(&units, 0.9);

        assert_relative_eq!(def.density, 6.0);
        assert_relative_eq!(def.density_world(&units), 1.5);
        assert_relative_eq!(def.friction_world(&units), 0.3);
        assert_relative_eq!(def.restitution_world(&units), 0.9);
    }

    #[test]
    fn test_missing_shape_has_no_builder() {
        assert!(FixtureDef::default().to_rapier_builder().is_none());
        let def = FixtureDef::new(ShapeDesc::Box { half_width: 1.0, half_height: 1.0 });
        assert!(def.to_rapier_builder().is_some());
    }
}
