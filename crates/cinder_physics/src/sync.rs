//! Tracking whether the render-side transform has caught up with the simulation

use crate::units::UnitConverter;
use cinder_math::{Transform2D, Vec2};

/// Per-body synchronisation state.
///
/// A body starts out of sync and goes out of sync again whenever it is
/// replaced. [`SyncState::reconcile`] hands the current transform to the
/// consumer in world units and clears the flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncState {
    out_of_sync: bool,
    last_known: Transform2D,
}

impl Default for SyncState {
    fn default() -> Self {
        Self {
            out_of_sync: true,
            last_known: Transform2D::IDENTITY,
        }
    }
}

impl SyncState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_dirty(&mut self) {
        self.out_of_sync = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.out_of_sync
    }

    /// Last transform handed out by [`SyncState::reconcile`], in world units
    pub fn last_known(&self) -> Transform2D {
        self.last_known
    }

    /// Convert a simulation transform to world units, remember it and clear the flag
    pub fn reconcile(&mut self, position: Vec2, angle: f32, units: &UnitConverter) -> Transform2D {
        let world = units.transform_to_world(position, angle);
        self.last_known = world;
        self.out_of_sync = false;
        world
    }

    /// Blend from the last reconciled transform towards `target`.
    ///
    /// While out of sync there is nothing meaningful to blend from, so the
    /// target is returned unchanged.
    pub fn interpolate(&self, target: &Transform2D, alpha: f32) -> Transform2D {
        if self.out_of_sync {
            *target
        } else {
            self.last_known.lerp(target, alpha.clamp(0.0, 1.0))
        }
    }
}
