//! Physics space - the backend plus everything the bindings need around it

use crate::backend::PhysicsBackend;
use crate::body::{BodyDef, BodyRef};
use crate::config::PhysicsConfig;
use crate::disposal::DisposalList;
use crate::error::Result;
use crate::shape::ShapeFactory;
use crate::units::UnitConverter;
use crate::world::RapierBackend;
use parking_lot::Mutex;
use std::sync::Arc;

/// A physics space shared with the scripting layer.
///
/// All body mutation goes through the lock, which gives the single-writer
/// discipline the engine needs.
pub type SharedSpace = Arc<Mutex<PhysicsSpace>>;

/// The physics backend together with its unit converter, default body
/// definition and disposal list.
pub struct PhysicsSpace {
    config: PhysicsConfig,
    units: UnitConverter,
    backend: Box<dyn PhysicsBackend>,
    disposals: DisposalList,
    default_body: BodyDef,
    accumulated_time: f32,
}

impl PhysicsSpace {
    /// Create a space over an existing backend
    pub fn new(config: PhysicsConfig, backend: Box<dyn PhysicsBackend>) -> Result<Self> {
        config.validate()?;
        let units = UnitConverter::new(config.scale)?;
        log::debug!(
            "Physics space on {} (scale {}, timestep {})",
            backend.name(),
            config.scale,
            config.timestep
        );
        Ok(Self {
            default_body: config.default_body.clone(),
            config,
            units,
            backend,
            disposals: DisposalList::new(),
            accumulated_time: 0.0,
        })
    }

    /// Create a space backed by Rapier
    pub fn with_rapier(config: PhysicsConfig) -> Result<Self> {
        let backend = RapierBackend::new(&config)?;
        Self::new(config, Box::new(backend))
    }

    /// Wrap in the shared handle used by the bindings
    pub fn into_shared(self) -> SharedSpace {
        Arc::new(Mutex::new(self))
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn units(&self) -> &UnitConverter {
        &self.units
    }

    /// Shape factory using this space's units
    pub fn shapes(&self) -> ShapeFactory {
        ShapeFactory::new(self.units)
    }

    pub fn backend(&self) -> &dyn PhysicsBackend {
        self.backend.as_ref()
    }

    pub fn backend_mut(&mut self) -> &mut dyn PhysicsBackend {
        self.backend.as_mut()
    }

    /// Definition used by [`RigidBody::spawn`](crate::rigid_body::RigidBody::spawn)
    pub fn default_body_def(&self) -> &BodyDef {
        &self.default_body
    }

    pub fn set_default_body_def(&mut self, def: BodyDef) {
        self.default_body = def;
    }

    // ==================== Disposal ====================

    /// Queue a body for destruction at the next drain
    pub fn queue_disposal(&mut self, body: BodyRef) -> Result<()> {
        self.disposals.push(body)?;
        log::trace!("Queued {:?} for disposal", body);
        Ok(())
    }

    pub fn disposals(&self) -> &DisposalList {
        &self.disposals
    }

    /// Destroy every queued body. Call this between steps, never during one.
    pub fn drain_disposals(&mut self) -> Vec<BodyRef> {
        self.disposals.drain(self.backend.as_mut())
    }

    // ==================== Simulation ====================

    /// Advance by `delta_time` using fixed substeps; returns the number of substeps run
    pub fn step(&mut self, delta_time: f32) -> u32 {
        self.accumulated_time += delta_time;

        let timestep = self.config.timestep;
        let mut steps = 0;
        while self.accumulated_time >= timestep && steps < self.config.max_substeps {
            self.backend.step(timestep);
            self.accumulated_time -= timestep;
            steps += 1;
        }

        // Drop time we could not catch up on rather than spiralling
        if steps == self.config.max_substeps && self.accumulated_time >= timestep {
            log::warn!(
                "Physics fell behind by {:.3}s, dropping accumulated time",
                self.accumulated_time
            );
            self.accumulated_time %= timestep;
        }

        steps
    }

    /// Fraction of a timestep left in the accumulator, for render interpolation
    pub fn interpolation_alpha(&self) -> f32 {
        self.accumulated_time / self.config.timestep
    }
}
