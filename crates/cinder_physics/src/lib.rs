//! Cinder Physics - Rigid Body Proxies over Rapier 2D
//!
//! This crate sits between game code (and scripts) and the physics engine.
//! Game code works in world units; the engine works in simulation units.
//!
//! # Features
//!
//! - Unit conversion between world and simulation space
//! - Box, circle and segment shape descriptors
//! - Rigid body handles with a create / replace / dispose lifecycle
//! - Deferred body destruction through a disposal list
//! - Forces and impulses at absolute, relative or centre points
//! - Render sync tracking
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                  PhysicsSpace                    │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────┐ │
//! │  │UnitConverter │ │ DisposalList │ │ BodyDef  │ │
//! │  └──────────────┘ └──────────────┘ └──────────┘ │
//! │  ┌──────────────────────────────────────────────┐│
//! │  │        Box<dyn PhysicsBackend>              ││
//! │  │   (RapierBackend / RecordingBackend)        ││
//! │  └──────────────────────────────────────────────┘│
//! └──────────────────────────────────────────────────┘
//!                        ▲
//!                        │ &mut PhysicsSpace
//!                 ┌─────────────┐
//!                 │  RigidBody  │──► SyncState
//!                 └─────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use cinder_physics::prelude::*;
//!
//! let mut space = PhysicsSpace::with_rapier(PhysicsConfig::default())?;
//!
//! let mut body = RigidBody::new();
//! body.create(&mut space, &BodyDef::dynamic())?;
//! let fixture = FixtureDef::new(space.shapes().make_box(16.0, 16.0));
//! body.add_fixture(&mut space, &fixture)?;
//! body.apply_force_to_centre(&mut space, Vec2::new(0.0, -10.0))?;
//!
//! space.drain_disposals();
//! space.step(1.0 / 60.0);
//! let transform = body.reconcile(&space)?;
//! ```

pub mod backend;
pub mod body;
pub mod config;
pub mod disposal;
pub mod error;
pub mod fixture;
pub mod rigid_body;
pub mod shape;
pub mod space;
pub mod sync;
pub mod units;
pub mod world;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub mod prelude {
    //! Common imports for physics functionality
    pub use crate::backend::PhysicsBackend;
    pub use crate::body::{BodyDef, BodyRef, BodyType};
    pub use crate::config::PhysicsConfig;
    pub use crate::disposal::DisposalList;
    pub use crate::error::{PhysicsError, Result};
    pub use crate::fixture::{FixtureDef, FixtureRef};
    pub use crate::rigid_body::{BodyState, RigidBody};
    pub use crate::shape::{ShapeDesc, ShapeFactory};
    pub use crate::space::{PhysicsSpace, SharedSpace};
    pub use crate::sync::SyncState;
    pub use crate::units::{UnitConverter, DEFAULT_SCALE};
    pub use crate::world::RapierBackend;
    pub use cinder_math::{Transform2D, Vec2};
}

pub use prelude::*;
