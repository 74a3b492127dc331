//! Collision shapes and the factory that builds them from world units

use crate::units::UnitConverter;
use cinder_math::Vec2;
use rapier2d::prelude as rapier;
use serde::{Deserialize, Serialize};

/// Collision shape, stored in simulation units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShapeDesc {
    /// Axis-aligned box around the body origin
    Box {
        half_width: f32,
        half_height: f32,
    },
    /// Circle offset from the body origin
    Circle {
        center: Vec2,
        radius: f32,
    },
    /// Line segment (edge) between two body-local points
    Segment {
        start: Vec2,
        end: Vec2,
    },
}

impl ShapeDesc {
    /// Short name used in logs and script type errors
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Box { .. } => "box",
            Self::Circle { .. } => "circle",
            Self::Segment { .. } => "segment",
        }
    }

    /// Build a Rapier shared shape and the translation it needs on the collider
    pub(crate) fn to_rapier(&self) -> (rapier::SharedShape, rapier::Vector<f32>) {
        match *self {
            Self::Box { half_width, half_height } => (
                rapier::SharedShape::cuboid(half_width, half_height),
                rapier::Vector::zeros(),
            ),
            Self::Circle { center, radius } => (
                rapier::SharedShape::ball(radius),
                rapier::Vector::new(center.x, center.y),
            ),
            Self::Segment { start, end } => (
                rapier::SharedShape::segment(
                    rapier::Point::new(start.x, start.y),
                    rapier::Point::new(end.x, end.y),
                ),
                rapier::Vector::zeros(),
            ),
        }
    }
}

/// Builds [`ShapeDesc`]s from world-space parameters.
///
/// Sizes are not validated: zero or negative extents are handed to the
/// physics engine unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeFactory {
    units: UnitConverter,
}

impl ShapeFactory {
    pub fn new(units: UnitConverter) -> Self {
        Self { units }
    }

    /// Box from world half-extents
    pub fn make_box(&self, half_width: f32, half_height: f32) -> ShapeDesc {
        let half = self.units.to_simulation(Vec2::new(half_width, half_height));
        ShapeDesc::Box {
            half_width: half.x,
            half_height: half.y,
        }
    }

    /// Circle from a world-space centre offset and radius.
    ///
    /// The radius is converted to simulation units like the centre. Callers
    /// porting scenes that passed a raw simulation-space radius must scale
    /// it to world units first.
    pub fn make_circle(&self, center_x: f32, center_y: f32, radius: f32) -> ShapeDesc {
        ShapeDesc::Circle {
            center: self.units.to_simulation(Vec2::new(center_x, center_y)),
            radius: self.units.length_to_simulation(radius),
        }
    }

    /// Segment between two world-space points
    pub fn make_segment(&self, x1: f32, y1: f32, x2: f32, y2: f32) -> ShapeDesc {
        ShapeDesc::Segment {
            start: self.units.to_simulation(Vec2::new(x1, y1)),
            end: self.units.to_simulation(Vec2::new(x2, y2)),
        }
    }
}
